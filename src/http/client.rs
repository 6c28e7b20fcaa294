//! HTTP client
//!
//! Thin wrapper over reqwest that:
//! - Resolves request targets against a base URL
//! - Applies default headers, query parameters and JSON bodies
//! - Enforces an explicit request timeout
//! - Parses response bodies as JSON
//!
//! It sends each request exactly once. Recovering from auth failures is the
//! executor's job.

use super::request::ApiRequest;
use super::response::RawResponse;
use crate::error::{Error, Result};
use crate::settings::Settings;
use reqwest::{Client, Response};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for relative request targets
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("authed-api/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }

    /// Config pointing at the settings' domain with the settings' timeout
    pub fn from_settings(settings: &Settings) -> Self {
        Self::builder()
            .base_url(settings.domain.clone())
            .timeout(settings.timeout())
            .build()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;

        Ok(Self { client, config })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Send a request once and return the status with the undecoded body
    pub async fn send(&self, request: &ApiRequest) -> Result<RawResponse> {
        let url = self.build_url(&request.target)?;

        let mut req = self.client.request(request.method.into(), url.clone());

        // Add default headers
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        // Add request-specific headers
        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        // Add query parameters
        if !request.params.is_empty() {
            req = req.query(&request.params);
        }

        // Only POST and PUT carry a body
        if request.method.carries_body() {
            req = req.json(&request.body);
        }

        debug!(
            "Sending {} {} (authenticated: {})",
            request.method,
            url,
            request.authorization().is_some()
        );

        let response = req.send().await.map_err(|e| self.classify(e))?;
        let response = RawResponse::read(response).await?;

        debug!("{} {} -> {}", request.method, url, response.status.as_u16());
        Ok(response)
    }

    /// POST a JSON body and hand back the raw response
    pub async fn post_json<B: Serialize + ?Sized>(&self, target: &str, body: &B) -> Result<Response> {
        let url = self.build_url(target)?;
        debug!("POST {}", url);
        self.client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.classify(e))
    }

    /// Build full URL from a path or absolute URL
    pub fn build_url(&self, target: &str) -> Result<Url> {
        if target.starts_with("http://") || target.starts_with("https://") {
            return Ok(Url::parse(target)?);
        }

        let joined = match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = target.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => target.to_string(),
        };
        Ok(Url::parse(&joined)?)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn classify(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            }
        } else {
            Error::Http(err)
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
