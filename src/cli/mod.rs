//! CLI module
//!
//! Command-line interface for the API client.
//!
//! # Commands
//!
//! - `request` - Send an arbitrary request
//! - `call` - Call a named endpoint
//! - `endpoints` - List known endpoints
//! - `token` - Obtain a token pair

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
