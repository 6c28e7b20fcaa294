//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Authenticated API client CLI
#[derive(Parser, Debug)]
#[command(name = "authed-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML). Falls back to API_DOMAIN / TOKEN_OBTAIN_SECRET
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Override the request timeout (seconds)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send an arbitrary request
    Request {
        /// HTTP method (GET, POST, PUT, DELETE)
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Path under the API domain, or an absolute URL
        #[arg(short, long)]
        path: String,

        /// Query parameter (key=value, repeatable)
        #[arg(short, long = "query", value_parser = parse_key_val)]
        query: Vec<(String, String)>,

        /// Header (key=value, repeatable)
        #[arg(short = 'H', long = "header", value_parser = parse_key_val)]
        header: Vec<(String, String)>,

        /// Inline JSON body
        #[arg(short, long)]
        body: Option<String>,
    },

    /// Call a named endpoint
    Call {
        /// Endpoint name (see `endpoints`)
        endpoint: String,

        /// Path template variable (key=value, repeatable)
        #[arg(long = "var", value_parser = parse_key_val)]
        vars: Vec<(String, String)>,

        /// Inline JSON body
        #[arg(short, long)]
        body: Option<String>,
    },

    /// List known endpoints
    Endpoints,

    /// Obtain a token pair to check the service credential
    Token,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Indented JSON
    Pretty,
}

/// Parse a `key=value` argument
fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
