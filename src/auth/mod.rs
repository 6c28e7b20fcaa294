//! Authentication module
//!
//! Bearer tokens for the API: an in-memory `TokenStore` shared by every
//! request, and a `TokenClient` that talks to the token-obtain and
//! token-refresh endpoints.

mod client;
mod store;
mod types;

pub use client::TokenClient;
pub use store::{TokenStore, ACCESS_TOKEN, REFRESH_TOKEN};
pub use types::{ServiceCredential, TokenPair};
