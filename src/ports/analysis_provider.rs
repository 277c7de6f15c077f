//! Analysis Provider Port - Interface for upstream text-analysis services.
//!
//! Each provider (chat-completion LLM, sentiment classifier, self-hosted model)
//! is an adapter behind this trait, so the gateway's control flow never sees
//! provider-specific request or response shapes.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoProvider;
//!
//! #[async_trait]
//! impl AnalysisProvider for EchoProvider {
//!     async fn analyze(&self, request: &ProviderRequest) -> Result<RawProviderResponse, ProviderError> {
//!         Ok(RawProviderResponse::Text(request.text.clone()))
//!     }
//!
//!     fn provider_info(&self) -> ProviderInfo {
//!         ProviderInfo::new(ProviderKind::Llama, "echo")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::domain::analysis::{build_analysis_prompt, AnalysisText, ProviderKind};

/// Port for upstream analysis providers.
///
/// Implementations make exactly one outbound call per `analyze`; they do not
/// retry and do not cache.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Sends the request upstream and returns the provider's payload as-is.
    async fn analyze(&self, request: &ProviderRequest) -> Result<RawProviderResponse, ProviderError>;

    /// Get provider information (kind and model).
    fn provider_info(&self) -> ProviderInfo;
}

/// What the gateway hands to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    /// The user's text, verbatim.
    pub text: String,
    /// The templated analysis prompt embedding `text`.
    pub prompt: String,
}

impl ProviderRequest {
    pub fn new(text: &AnalysisText) -> Self {
        Self {
            text: text.as_str().to_string(),
            prompt: build_analysis_prompt(text.as_str()),
        }
    }
}

/// Provider payload passed through the gateway without schema checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawProviderResponse {
    /// Model-generated text, expected (not guaranteed) to be analysis JSON.
    Text(String),
    /// A provider's native JSON reply.
    Json(Value),
}

impl RawProviderResponse {
    pub fn into_value(self) -> Value {
        match self {
            RawProviderResponse::Text(text) => Value::String(text),
            RawProviderResponse::Json(value) => value,
        }
    }
}

/// Provider information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    pub kind: ProviderKind,
    /// Model identifier (e.g., "gpt-4o-mini").
    pub model: String,
}

impl ProviderInfo {
    pub fn new(kind: ProviderKind, model: impl Into<String>) -> Self {
        Self {
            kind,
            model: model.into(),
        }
    }
}

/// Provider errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    /// No adapter is configured for the requested provider.
    #[error("provider '{0}' is not configured")]
    NotConfigured(ProviderKind),

    /// API key was rejected.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Rate limited by provider.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Provider answered with a server error.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// Provider rejected the request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl ProviderError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn provider_request_templates_prompt() {
        let text = AnalysisText::new("Hey guys!").unwrap();
        let request = ProviderRequest::new(&text);
        assert_eq!(request.text, "Hey guys!");
        assert!(request.prompt.contains("Hey guys!"));
        assert_ne!(request.prompt, request.text);
    }

    #[test]
    fn raw_text_serializes_as_json_string() {
        let raw = RawProviderResponse::Text("{\"a\":1}".to_string());
        assert_eq!(serde_json::to_value(&raw).unwrap(), json!("{\"a\":1}"));
        assert_eq!(raw.into_value(), json!("{\"a\":1}"));
    }

    #[test]
    fn raw_json_serializes_unchanged() {
        let native = json!([[{ "label": "POSITIVE", "score": 0.98 }]]);
        let raw = RawProviderResponse::Json(native.clone());
        assert_eq!(serde_json::to_value(&raw).unwrap(), native);
    }

    #[test]
    fn provider_error_displays_upstream_text() {
        assert_eq!(
            ProviderError::unavailable("Server error 503: overloaded").to_string(),
            "provider unavailable: Server error 503: overloaded"
        );
        assert_eq!(
            ProviderError::NotConfigured(ProviderKind::OpenAI).to_string(),
            "provider 'openai' is not configured"
        );
        assert_eq!(
            ProviderError::Timeout { timeout_secs: 30 }.to_string(),
            "request timed out after 30s"
        );
    }
}
