//! Async HTTP clients for fetching raw metadata payloads.
//!
//! - [`github`]: repository metadata plus countable sub-resources and README.
//! - [`huggingface`]: Hub model metadata plus model card README.
//!
//! Both return the upstream JSON object as a [`Payload`] without interpreting
//! it; normalization happens elsewhere. Failures are reported as [`FetchError`]
//! so callers can tell a rejected request from an unusable body.

pub mod github;
pub mod huggingface;

use std::path::Path;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::models::Payload;

const USER_AGENT: &str = concat!("model-catalog/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum FetchError {
    /// The upstream rejected the request (auth, rate limit, not found).
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A response arrived but its body is not a usable payload.
    #[error("unusable payload: {0}")]
    Data(String),

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Build a client with the catalog's user agent and a request timeout.
pub fn build_client(timeout_secs: u64) -> Result<Client, FetchError> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

/// Attach a bearer token read from `token_env`, when that variable is set and non-empty.
fn with_token(request: RequestBuilder, token_env: &str) -> RequestBuilder {
    match std::env::var(token_env) {
        Ok(token) if !token.trim().is_empty() => request.bearer_auth(token.trim()),
        _ => request,
    }
}

/// Turn a non-success response into [`FetchError::Api`].
async fn check_status(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let rate_limited = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        == Some("0");
    let body = response.text().await.unwrap_or_default();
    Err(api_error(status, rate_limited, &body))
}

fn api_error(status: StatusCode, rate_limited: bool, body: &str) -> FetchError {
    let upstream = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
        });

    let message = if rate_limited || status == StatusCode::TOO_MANY_REQUESTS {
        "rate limit exceeded".to_string()
    } else if status == StatusCode::NOT_FOUND {
        "not found".to_string()
    } else if status == StatusCode::UNAUTHORIZED {
        "authentication required or token rejected".to_string()
    } else {
        upstream
            .clone()
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string())
    };

    let message = match upstream {
        Some(detail) if detail != message => format!("{message} ({detail})"),
        _ => message,
    };

    FetchError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Require a JSON body to be an object.
fn into_payload(value: Value) -> Result<Payload, FetchError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(FetchError::Data(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Load a raw payload from a JSON file instead of the network.
pub fn load_payload(path: &Path) -> Result<Payload, FetchError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| FetchError::Data(format!("reading {}: {}", path.display(), e)))?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|e| FetchError::Data(format!("parsing {}: {}", path.display(), e)))?;
    into_payload(value)
}
