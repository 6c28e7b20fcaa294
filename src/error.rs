//! Error types for authed-api
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::types::Method;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for authed-api
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("Unsupported HTTP method: {method}")]
    UnsupportedMethod { method: String },

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Failed to obtain access token: {message}")]
    TokenObtain { message: String },

    #[error("Failed to refresh access token: {message}")]
    TokenRefresh { message: String },

    #[error("Cannot send authenticated {method} {target} without a valid token: {reason}")]
    AuthenticationExhausted {
        method: Method,
        target: String,
        reason: String,
    },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to decode response (HTTP {status}): {message}")]
    Decode { status: u16, message: String },

    // ============================================================================
    // Template Errors
    // ============================================================================
    #[error("Template error: {message}")]
    Template { message: String },

    #[error("Undefined variable in template: {variable}")]
    UndefinedVariable { variable: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported method error
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod {
            method: method.into(),
        }
    }

    /// Create a token obtain error
    pub fn token_obtain(message: impl Into<String>) -> Self {
        Self::TokenObtain {
            message: message.into(),
        }
    }

    /// Create a token refresh error
    pub fn token_refresh(message: impl Into<String>) -> Self {
        Self::TokenRefresh {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a template error
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    /// Create an undefined variable error
    pub fn undefined_var(variable: impl Into<String>) -> Self {
        Self::UndefinedVariable {
            variable: variable.into(),
        }
    }

    /// Whether the executor can move on to the next recovery step after this error.
    ///
    /// Only token endpoint failures qualify. Everything else ends `run()`.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::TokenObtain { .. } | Error::TokenRefresh { .. })
    }
}

/// Result type alias for authed-api
pub type Result<T> = std::result::Result<T, Error>;
