//! Request descriptor
//!
//! Everything needed to issue one API call. Apart from the `Authorization`
//! header, which the executor manages, a request does not change once it is
//! built.

use crate::error::Result;
use crate::types::{JsonValue, Method, StringMap};
use serde_json::json;

/// Name of the header carrying the bearer token
pub const AUTHORIZATION: &str = "Authorization";

/// A single API request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Absolute URL, or a path resolved against the client's base URL
    pub target: String,
    /// HTTP method
    pub method: Method,
    /// Request headers
    pub headers: StringMap,
    /// Query parameters
    pub params: StringMap,
    /// JSON body, sent for POST and PUT only
    pub body: JsonValue,
}

impl ApiRequest {
    /// Create a request with no headers, no params and an empty JSON object body
    pub fn new(target: impl Into<String>, method: Method) -> Self {
        Self {
            target: target.into(),
            method,
            headers: StringMap::new(),
            params: StringMap::new(),
            body: json!({}),
        }
    }

    /// Create a request from a method name.
    ///
    /// Fails with `UnsupportedMethod` for anything but GET/POST/PUT/DELETE.
    pub fn parse(target: impl Into<String>, method: &str) -> Result<Self> {
        Ok(Self::new(target, method.parse()?))
    }

    /// GET request
    pub fn get(target: impl Into<String>) -> Self {
        Self::new(target, Method::GET)
    }

    /// POST request with a JSON body
    pub fn post(target: impl Into<String>, body: JsonValue) -> Self {
        Self::new(target, Method::POST).json(body)
    }

    /// PUT request with a JSON body
    pub fn put(target: impl Into<String>, body: JsonValue) -> Self {
        Self::new(target, Method::PUT).json(body)
    }

    /// DELETE request
    pub fn delete(target: impl Into<String>) -> Self {
        Self::new(target, Method::DELETE)
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set the JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = body;
        self
    }

    /// Set or remove the bearer token header.
    ///
    /// Header names are case-insensitive, so any existing spelling of
    /// `Authorization` is replaced.
    pub fn set_bearer(&mut self, token: Option<&str>) {
        self.headers
            .retain(|key, _| !key.eq_ignore_ascii_case(AUTHORIZATION));
        if let Some(token) = token {
            self.headers
                .insert(AUTHORIZATION.to_string(), format!("Bearer {token}"));
        }
    }

    /// Current `Authorization` header value, if any
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(AUTHORIZATION))
            .map(|(_, value)| value.as_str())
    }
}
