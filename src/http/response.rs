//! API responses
//!
//! A response is read in two steps: `RawResponse` holds the status and the
//! undecoded body text, `ApiResponse` holds the parsed JSON. Callers that
//! only need the status never hit a decode error.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use reqwest::{Response, StatusCode};

/// Status and body text of a finished request, before JSON decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Body as sent by the server
    pub text: String,
}

impl RawResponse {
    /// Read the status and body of a reqwest response
    pub async fn read(response: Response) -> Result<Self> {
        let status = response.status();
        let text = response.text().await.map_err(Error::Http)?;
        Ok(Self { status, text })
    }

    /// Parse the body as JSON; an empty body becomes `null`
    pub fn decode(self) -> Result<ApiResponse> {
        if self.text.trim().is_empty() {
            return Ok(ApiResponse::new(self.status, JsonValue::Null));
        }

        let body = serde_json::from_str(&self.text).map_err(|e| Error::Decode {
            status: self.status.as_u16(),
            message: format!("{e}: {}", truncate(&self.text, 200)),
        })?;
        Ok(ApiResponse::new(self.status, body))
    }
}

/// Status and parsed JSON body of a finished request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Parsed body; `null` when the server sent nothing
    pub body: JsonValue,
}

impl ApiResponse {
    /// Create a response from parts
    pub fn new(status: StatusCode, body: JsonValue) -> Self {
        Self { status, body }
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Turn a non-2xx response into `Error::HttpStatus`
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::http_status(self.status.as_u16(), self.body.to_string()))
        }
    }

    /// Take the parsed body
    pub fn into_json(self) -> JsonValue {
        self.body
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
