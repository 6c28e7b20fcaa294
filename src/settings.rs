//! Client settings
//!
//! A single settings source supplies the API domain and the service
//! credential used to mint tokens. Settings come either from one YAML file
//! or from environment variables, never a merge of both.

use crate::endpoints::EndpointConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the API base domain
pub const ENV_DOMAIN: &str = "API_DOMAIN";
/// Environment variable holding the token-obtain secret
pub const ENV_TOKEN_OBTAIN_SECRET: &str = "TOKEN_OBTAIN_SECRET";
/// Environment variable overriding the token provider identifier
pub const ENV_TOKEN_PROVIDER: &str = "TOKEN_PROVIDER";
/// Environment variable overriding the user identifier sent when obtaining tokens
pub const ENV_TOKEN_UID: &str = "TOKEN_UID";
/// Environment variable overriding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "API_TIMEOUT_SECS";

/// Settings for talking to the API
#[derive(Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base domain, e.g. `https://judge.example.com`
    pub domain: String,

    /// Secret presented to the token-obtain endpoint
    pub token_obtain_secret: String,

    /// Provider identifier sent with the secret
    #[serde(default = "default_provider")]
    pub provider: String,

    /// User identifier sent with the secret
    #[serde(default = "default_uid")]
    pub uid: u64,

    /// Path of the token-obtain endpoint
    #[serde(default = "default_token_obtain_path")]
    pub token_obtain_path: String,

    /// Path of the token-refresh endpoint
    #[serde(default = "default_token_refresh_path")]
    pub token_refresh_path: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra or overriding endpoint definitions, keyed by name
    #[serde(default)]
    pub endpoints: HashMap<String, EndpointConfig>,
}

fn default_provider() -> String {
    "moodle".to_string()
}

fn default_uid() -> u64 {
    1
}

fn default_token_obtain_path() -> String {
    "/api/token/".to_string()
}

fn default_token_refresh_path() -> String {
    "/api/token/refresh/".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Settings {
    /// Create settings with defaults for everything but the domain and secret
    pub fn new(domain: impl Into<String>, token_obtain_secret: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            token_obtain_secret: token_obtain_secret.into(),
            provider: default_provider(),
            uid: default_uid(),
            token_obtain_path: default_token_obtain_path(),
            token_refresh_path: default_token_refresh_path(),
            timeout_secs: default_timeout_secs(),
            endpoints: HashMap::new(),
        }
    }

    /// Load settings from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let domain = lookup(ENV_DOMAIN).ok_or_else(|| Error::missing_field(ENV_DOMAIN))?;
        let secret = lookup(ENV_TOKEN_OBTAIN_SECRET)
            .ok_or_else(|| Error::missing_field(ENV_TOKEN_OBTAIN_SECRET))?;

        let mut settings = Self::new(domain, secret);

        if let Some(provider) = lookup(ENV_TOKEN_PROVIDER) {
            settings.provider = provider;
        }
        if let Some(uid) = lookup(ENV_TOKEN_UID) {
            settings.uid = uid
                .parse()
                .map_err(|e| Error::invalid_value(ENV_TOKEN_UID, format!("{e}")))?;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            settings.timeout_secs = secs
                .parse()
                .map_err(|e| Error::invalid_value(ENV_TIMEOUT_SECS, format!("{e}")))?;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Check that the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.domain.trim().is_empty() {
            return Err(Error::missing_field("domain"));
        }
        let url = url::Url::parse(&self.domain)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "domain",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.token_obtain_secret.is_empty() {
            return Err(Error::missing_field("token_obtain_secret"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be positive"));
        }
        Ok(())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("domain", &self.domain)
            .field("token_obtain_secret", &"<redacted>")
            .field("provider", &self.provider)
            .field("uid", &self.uid)
            .field("token_obtain_path", &self.token_obtain_path)
            .field("token_refresh_path", &self.token_refresh_path)
            .field("timeout_secs", &self.timeout_secs)
            .field("endpoints", &self.endpoints.keys().collect::<Vec<_>>())
            .finish()
    }
}
