// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # authed-api
//!
//! A minimal authenticated REST client. Requests carry a bearer token from an
//! in-memory token store; when the API answers `401 Unauthorized` the client
//! refreshes the token, or mints a new one with a service credential, and
//! tries again.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use authed_api::{endpoints, ApiClient, Result, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let settings = Settings::from_env()?;
//!     let client = ApiClient::new(&settings)?;
//!
//!     let problem = client.run(endpoints::problem_details("newproblem")?).await?;
//!     println!("{}", problem.body);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        ApiClient                         │
//! │   run(request) → Executor::run() → ApiResponse           │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌────────────┬───────────────┼──────────────┬──────────────┐
//! │  Executor  │     Auth      │     HTTP     │  Endpoints   │
//! ├────────────┼───────────────┼──────────────┼──────────────┤
//! │ Send       │ TokenStore    │ ApiRequest   │ Path template│
//! │ Refresh    │ TokenClient   │ ApiResponse  │ Method       │
//! │ Reacquire  │  obtain       │ Timeout      │ Headers      │
//! │ Final try  │  refresh      │ Base URL     │              │
//! └────────────┴───────────────┴──────────────┴──────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Settings loading
pub mod settings;

/// Token store and token endpoint client
pub mod auth;

/// HTTP requests, responses and client
pub mod http;

/// Auth recovery state machine
pub mod executor;

/// API client tying the pieces together
pub mod client;

/// Endpoint definitions
pub mod endpoints;

/// Path template interpolation
pub mod template;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::ApiClient;
pub use error::{Error, Result};
pub use http::{ApiRequest, ApiResponse};
pub use settings::Settings;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
