//! API client
//!
//! Bundles the HTTP client, the shared token store and the token endpoint
//! client, and hands out executors for individual requests.

use crate::auth::{TokenClient, TokenPair, TokenStore};
use crate::endpoints::EndpointRegistry;
use crate::error::Result;
use crate::executor::{Execution, Executor};
use crate::http::{ApiRequest, ApiResponse, HttpClient, HttpClientConfig};
use crate::settings::Settings;
use crate::template::TemplateVars;
use crate::types::JsonValue;

/// Authenticated API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    tokens: TokenStore,
    auth: TokenClient,
    endpoints: EndpointRegistry,
}

impl ApiClient {
    /// Create a client with a fresh, empty token store
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_store(settings, TokenStore::new())
    }

    /// Create a client that shares an existing token store
    pub fn with_store(settings: &Settings, tokens: TokenStore) -> Result<Self> {
        settings.validate()?;
        let http = HttpClient::with_config(HttpClientConfig::from_settings(settings))?;
        Ok(Self::from_parts(
            http.clone(),
            tokens,
            TokenClient::from_settings(http, settings),
            EndpointRegistry::with_overrides(&settings.endpoints),
        ))
    }

    /// Assemble a client from its parts
    pub fn from_parts(
        http: HttpClient,
        tokens: TokenStore,
        auth: TokenClient,
        endpoints: EndpointRegistry,
    ) -> Self {
        Self {
            http,
            tokens,
            auth,
            endpoints,
        }
    }

    /// The shared token store
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// The known endpoints
    pub fn endpoints(&self) -> &EndpointRegistry {
        &self.endpoints
    }

    /// The underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Create an executor for `request`
    pub fn executor(&self, request: ApiRequest) -> Executor<'_> {
        Executor::new(&self.http, &self.tokens, &self.auth, request)
    }

    /// Run `request` through the auth recovery sequence
    pub async fn run(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.executor(request).run().await
    }

    /// Like [`ApiClient::run`], also reporting the states visited
    pub async fn run_traced(&self, request: ApiRequest) -> Execution {
        self.executor(request).run_traced().await
    }

    /// Run a named endpoint
    pub async fn call(
        &self,
        endpoint: &str,
        vars: &TemplateVars,
        body: Option<JsonValue>,
    ) -> Result<ApiResponse> {
        let request = self.endpoints.request(endpoint, vars, body)?;
        self.run(request).await
    }

    /// Obtain a fresh token pair and cache it
    pub async fn login(&self) -> Result<TokenPair> {
        let pair = self.auth.obtain().await?;
        self.tokens.store_pair(&pair).await;
        Ok(pair)
    }
}
