//! Shared HTTP plumbing for provider adapters.

use reqwest::{Client, Response};
use std::time::Duration;

use crate::ports::ProviderError;

/// Builds a client, keeping reqwest's default (no timeout) when `timeout` is unset.
pub(crate) fn build_client(timeout: Option<Duration>) -> Result<Client, ProviderError> {
    let builder = match timeout {
        Some(timeout) => Client::builder().timeout(timeout),
        None => Client::builder(),
    };
    builder
        .build()
        .map_err(|e| ProviderError::network(format!("Failed to create HTTP client: {}", e)))
}

/// Classifies a transport-level failure.
pub(crate) fn map_send_error(err: reqwest::Error, timeout: Option<Duration>) -> ProviderError {
    match timeout {
        Some(timeout) if err.is_timeout() => ProviderError::Timeout {
            timeout_secs: timeout.as_secs(),
        },
        _ if err.is_connect() => ProviderError::network(format!("Connection failed: {}", err)),
        _ => ProviderError::network(err.to_string()),
    }
}

/// Passes 2xx responses through and turns everything else into a `ProviderError`
/// carrying the upstream error text.
pub(crate) async fn check_status(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = upstream_message(&body);

    Err(match status.as_u16() {
        401 | 403 => ProviderError::AuthenticationFailed(message),
        429 => ProviderError::RateLimited(message),
        400..=499 => ProviderError::InvalidRequest(format!("{}: {}", status, message)),
        500..=599 => ProviderError::unavailable(format!("Server error {}: {}", status, message)),
        _ => ProviderError::network(format!("Unexpected status {}: {}", status, message)),
    })
}

/// Pulls the human-readable message out of common error envelopes.
///
/// Handles `{"error": {"message": ...}}` (OpenAI) and `{"error": "..."}`
/// (Hugging Face and the gateway itself); anything else is returned trimmed.
pub(crate) fn upstream_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(body) {
        let error = parsed.get("error");
        if let Some(message) = error
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .or_else(|| error.and_then(|e| e.as_str()))
        {
            return message.to_string();
        }
    }
    body.trim().to_string()
}

/// Joins a base URL and a path without doubling the slash.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
