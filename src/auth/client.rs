//! Token endpoint client
//!
//! Obtains a fresh token pair with the service credential, or refreshes the
//! current pair with a refresh token. Every failure is reported as a
//! recoverable `TokenObtain`/`TokenRefresh` error so the executor can move on
//! to its next step.

use super::types::{RefreshRequest, ServiceCredential, TokenPair};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::settings::Settings;
use reqwest::Response;
use tracing::debug;

/// Client for the token-obtain and token-refresh endpoints
#[derive(Debug, Clone)]
pub struct TokenClient {
    http: HttpClient,
    credential: ServiceCredential,
    obtain_path: String,
    refresh_path: String,
}

impl TokenClient {
    /// Create a token client
    pub fn new(
        http: HttpClient,
        credential: ServiceCredential,
        obtain_path: impl Into<String>,
        refresh_path: impl Into<String>,
    ) -> Self {
        Self {
            http,
            credential,
            obtain_path: obtain_path.into(),
            refresh_path: refresh_path.into(),
        }
    }

    /// Create a token client from settings
    pub fn from_settings(http: HttpClient, settings: &Settings) -> Self {
        Self::new(
            http,
            ServiceCredential::from(settings),
            settings.token_obtain_path.clone(),
            settings.token_refresh_path.clone(),
        )
    }

    /// Mint a brand-new token pair with the service credential
    pub async fn obtain(&self) -> Result<TokenPair> {
        debug!("Obtaining token pair from {}", self.obtain_path);

        let response = self
            .http
            .post_json(&self.obtain_path, &self.credential)
            .await
            .map_err(|e| Error::token_obtain(e.to_string()))?;

        read_token_pair(response)
            .await
            .map_err(Error::token_obtain)
    }

    /// Exchange a refresh token for a new token pair.
    ///
    /// Without a refresh token this fails immediately, no request is sent.
    pub async fn refresh(&self, refresh_token: Option<&str>) -> Result<TokenPair> {
        let Some(refresh) = refresh_token else {
            return Err(Error::token_refresh("no refresh token cached"));
        };

        debug!("Refreshing token pair at {}", self.refresh_path);

        let response = self
            .http
            .post_json(&self.refresh_path, &RefreshRequest { refresh })
            .await
            .map_err(|e| Error::token_refresh(e.to_string()))?;

        read_token_pair(response)
            .await
            .map_err(Error::token_refresh)
    }
}

/// Decode a token endpoint response, describing any failure as a message
async fn read_token_pair(response: Response) -> std::result::Result<TokenPair, String> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(format!(
            "token endpoint returned {}: {}",
            status.as_u16(),
            body
        ));
    }

    response
        .json::<TokenPair>()
        .await
        .map_err(|e| format!("invalid token response: {e}"))
}
