//! Authenticated request executor
//!
//! Sends one request with the cached bearer token and, when the server
//! answers `401 Unauthorized`, walks the recovery sequence:
//!
//! ```text
//! Initial ─► Sent ──(not 401)──────────────────────────────────► Done
//!              │
//!              └─(401)─► RefreshAttempted ──(ok)──► resend ─────► Done
//!                             │
//!                             └─(fail, clear tokens)─► ReacquireAttempted ──(ok)──► resend ─► Done
//!                                                            │
//!                                                            └─(fail)─► FinalAttempt
//!                                                                 GET: unauthenticated send ─► Done
//!                                                                 POST/PUT/DELETE: AuthenticationExhausted
//! ```
//!
//! Only the HTTP status decides whether a response is an auth failure.
//! Bodies are decoded only for the response the run ends with, so a 401
//! carrying an HTML or plain-text page still goes through recovery.

mod types;

pub use types::{AttemptState, Execution};

use crate::auth::{TokenClient, TokenStore};
use crate::error::{Error, Result};
use crate::http::{ApiRequest, ApiResponse, HttpClient, RawResponse};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

/// Runs a single request through the auth recovery sequence
pub struct Executor<'a> {
    http: &'a HttpClient,
    tokens: &'a TokenStore,
    auth: &'a TokenClient,
    request: ApiRequest,
    state: AttemptState,
    states: Vec<AttemptState>,
    sends: u32,
}

impl<'a> Executor<'a> {
    /// Create an executor for `request`
    pub fn new(
        http: &'a HttpClient,
        tokens: &'a TokenStore,
        auth: &'a TokenClient,
        request: ApiRequest,
    ) -> Self {
        Self {
            http,
            tokens,
            auth,
            request,
            state: AttemptState::Initial,
            states: vec![AttemptState::Initial],
            sends: 0,
        }
    }

    /// The request being executed
    pub fn request(&self) -> &ApiRequest {
        &self.request
    }

    /// Current state
    pub fn state(&self) -> AttemptState {
        self.state
    }

    /// Run the request and return the final response
    pub async fn run(self) -> Result<ApiResponse> {
        self.run_traced().await.result
    }

    /// Run the request and return the response along with the states visited
    pub async fn run_traced(mut self) -> Execution {
        let result = self.drive().await;
        self.advance(AttemptState::Done);
        Execution {
            result,
            states: self.states,
            sends: self.sends,
        }
    }

    async fn drive(&mut self) -> Result<ApiResponse> {
        let response = self.send().await?;
        self.advance(AttemptState::Sent);

        if !is_auth_failure(response.status) {
            return response.decode();
        }

        info!(
            "{} {} was rejected as unauthorized, renewing token",
            self.request.method, self.request.target
        );

        match self.renew_token().await {
            Ok(()) => self.send().await?.decode(),
            Err(err) if err.is_recoverable() => self.final_attempt(err).await,
            Err(err) => Err(err),
        }
    }

    /// Refresh the token pair, falling back to a reacquire
    async fn renew_token(&mut self) -> Result<()> {
        self.advance(AttemptState::RefreshAttempted);
        let refresh_token = self.tokens.refresh_token().await;
        match self.auth.refresh(refresh_token.as_deref()).await {
            Ok(pair) => {
                self.tokens.store_pair(&pair).await;
                debug!("Token pair refreshed");
                return Ok(());
            }
            Err(err) => {
                warn!("Error refreshing token: {err}");
                self.tokens.clear().await;
            }
        }

        self.advance(AttemptState::ReacquireAttempted);
        let pair = self.auth.obtain().await?;
        self.tokens.store_pair(&pair).await;
        debug!("New token pair obtained");
        Ok(())
    }

    /// Every token source failed. Safe methods go out once more without a
    /// token; anything with side effects stops here.
    async fn final_attempt(&mut self, cause: Error) -> Result<ApiResponse> {
        self.advance(AttemptState::FinalAttempt);
        warn!("Error obtaining new access token: {cause}");

        if !self.request.method.is_safe() {
            return Err(Error::AuthenticationExhausted {
                method: self.request.method,
                target: self.request.target.clone(),
                reason: cause.to_string(),
            });
        }

        self.request.set_bearer(None);
        self.dispatch().await?.decode()
    }

    /// Attach the cached access token (if any) and send
    async fn send(&mut self) -> Result<RawResponse> {
        let token = self.tokens.access_token().await;
        self.request.set_bearer(token.as_deref());
        self.dispatch().await
    }

    async fn dispatch(&mut self) -> Result<RawResponse> {
        self.sends += 1;
        self.http.send(&self.request).await
    }

    fn advance(&mut self, next: AttemptState) {
        debug!(
            "{} {}: {} -> {}",
            self.request.method, self.request.target, self.state, next
        );
        self.state = next;
        self.states.push(next);
    }
}

/// A response is an auth failure when, and only when, its status is 401
pub fn is_auth_failure(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED
}
