//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::ApiClient;
use crate::endpoints::EndpointRegistry;
use crate::error::{Error, Result};
use crate::http::{ApiRequest, ApiResponse};
use crate::settings::Settings;
use crate::template::TemplateVars;
use crate::types::{JsonValue, StringMap};
use serde_json::json;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Request {
                method,
                path,
                query,
                header,
                body,
            } => {
                let request = build_request(method, path, query, header, body.as_deref())?;
                let client = self.client()?;
                let response = client.run(request).await?;
                self.finish(response)
            }
            Commands::Call {
                endpoint,
                vars,
                body,
            } => {
                let vars: StringMap = vars.iter().cloned().collect();
                let body = body.as_deref().map(parse_body).transpose()?;
                let client = self.client()?;
                let response = client
                    .call(endpoint, &TemplateVars::from(&vars), body)
                    .await?;
                self.finish(response)
            }
            Commands::Endpoints => self.endpoints(),
            Commands::Token => self.token().await,
        }
    }

    /// Load settings from the file given with `--settings`, else the environment
    fn load_settings(&self) -> Result<Settings> {
        let mut settings = match &self.cli.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::from_env().map_err(|e| {
                Error::config(format!(
                    "{e} (pass --settings <FILE> or set the environment variables)"
                ))
            })?,
        };
        if let Some(secs) = self.cli.timeout {
            settings.timeout_secs = secs;
            settings.validate()?;
        }
        Ok(settings)
    }

    fn client(&self) -> Result<ApiClient> {
        let settings = self.load_settings()?;
        info!("Using API at {}", settings.domain);
        ApiClient::new(&settings)
    }

    /// Print the response body and fail on a non-2xx status
    fn finish(&self, response: ApiResponse) -> Result<()> {
        self.print(&response.body)?;
        response.error_for_status().map(|_| ())
    }

    /// List endpoints
    fn endpoints(&self) -> Result<()> {
        // The endpoint list does not need credentials, only optional overrides
        let registry = match &self.cli.settings {
            Some(path) => EndpointRegistry::with_overrides(&Settings::load(path)?.endpoints),
            None => EndpointRegistry::builtin(),
        };

        let endpoints: Vec<JsonValue> = registry
            .iter()
            .map(|(name, endpoint)| {
                json!({
                    "name": name,
                    "method": endpoint.method,
                    "path": endpoint.path,
                    "variables": endpoint.variables(),
                })
            })
            .collect();
        self.print(&JsonValue::Array(endpoints))
    }

    /// Obtain a token pair without revealing it
    async fn token(&self) -> Result<()> {
        let client = self.client()?;
        let pair = client.login().await?;
        self.print(&json!({
            "status": "ok",
            "access_token_length": pair.access.len(),
            "refresh_token": pair.refresh.is_some(),
        }))
    }

    fn print(&self, value: &JsonValue) -> Result<()> {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{rendered}");
        Ok(())
    }
}

/// Build a request from command-line parts
fn build_request(
    method: &str,
    path: &str,
    query: &[(String, String)],
    headers: &[(String, String)],
    body: Option<&str>,
) -> Result<ApiRequest> {
    let mut request = ApiRequest::parse(path, method)?;
    for (key, value) in query {
        request = request.query(key, value);
    }
    for (key, value) in headers {
        request = request.header(key, value);
    }
    if let Some(body) = body {
        request = request.json(parse_body(body)?);
    }
    Ok(request)
}

fn parse_body(body: &str) -> Result<JsonValue> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Method;

    #[test]
    fn test_build_request() {
        let request = build_request(
            "post",
            "/api/v2/problems",
            &[("page".to_string(), "1".to_string())],
            &[("Content-Type".to_string(), "application/json".to_string())],
            Some(r#"{"code": "p1"}"#),
        )
        .unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.params["page"], "1");
        assert_eq!(request.headers["Content-Type"], "application/json");
        assert_eq!(request.body["code"], "p1");
    }

    #[test]
    fn test_build_request_rejects_method_and_body() {
        assert!(matches!(
            build_request("PATCH", "/x", &[], &[], None),
            Err(Error::UnsupportedMethod { .. })
        ));
        assert!(matches!(
            build_request("PUT", "/x", &[], &[], Some("{not json")),
            Err(Error::JsonParse(_))
        ));
    }
}
