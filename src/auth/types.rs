//! Token payload types
//!
//! Wire shapes of the token-obtain and token-refresh endpoints.

use crate::settings::Settings;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Access/refresh token pair returned by both token endpoints
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// The access token
    pub access: String,
    /// The refresh token, if the server issued one
    #[serde(default)]
    pub refresh: Option<String>,
}

impl TokenPair {
    /// Create a token pair
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: Some(refresh.into()),
        }
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &"<redacted>")
            .field("refresh", &self.refresh.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Credential presented to the token-obtain endpoint
#[derive(Clone, Serialize)]
pub struct ServiceCredential {
    /// Shared service secret
    pub api_secret: String,
    /// Identity provider name
    pub provider: String,
    /// User the token is minted for
    pub uid: u64,
}

impl ServiceCredential {
    /// Create a credential
    pub fn new(api_secret: impl Into<String>, provider: impl Into<String>, uid: u64) -> Self {
        Self {
            api_secret: api_secret.into(),
            provider: provider.into(),
            uid,
        }
    }
}

impl From<&Settings> for ServiceCredential {
    fn from(settings: &Settings) -> Self {
        Self::new(
            settings.token_obtain_secret.clone(),
            settings.provider.clone(),
            settings.uid,
        )
    }
}

impl fmt::Debug for ServiceCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceCredential")
            .field("api_secret", &"<redacted>")
            .field("provider", &self.provider)
            .field("uid", &self.uid)
            .finish()
    }
}

/// Body of a token-refresh request
#[derive(Debug, Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub refresh: &'a str,
}
