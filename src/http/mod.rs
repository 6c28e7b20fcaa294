//! HTTP client module
//!
//! Request descriptors, decoded responses and the reqwest-backed client
//! that sends them.
//!
//! # Features
//!
//! - **Request descriptors**: target, method, headers, query and JSON body
//! - **Explicit timeouts**: every request is bounded by the configured timeout
//! - **JSON responses**: bodies are parsed into `serde_json::Value`

mod client;
mod request;
mod response;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use request::{ApiRequest, AUTHORIZATION};
pub use response::{ApiResponse, RawResponse};

#[cfg(test)]
mod tests;
