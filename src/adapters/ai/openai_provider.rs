//! OpenAI Provider - Implementation of AnalysisProvider for chat-completion APIs.
//!
//! Sends the analysis prompt with the brand-analyst system role and returns the
//! first choice's content with any surrounding code fence removed.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let provider = OpenAIProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::http_support::{build_client, check_status, endpoint, map_send_error};
use crate::domain::analysis::{strip_code_fences, ProviderKind, SYSTEM_PROMPT};
use crate::ports::{
    AnalysisProvider, ProviderError, ProviderInfo, ProviderRequest, RawProviderResponse,
};

/// Configuration for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gpt-4o-mini").
    pub model: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout; `None` keeps the HTTP client default.
    pub timeout: Option<Duration>,
    /// Sampling temperature, sent only when set.
    pub temperature: Option<f32>,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: None,
            temperature: None,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI API provider implementation.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a new OpenAI provider with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self, ProviderError> {
        let client = build_client(config.timeout)?;
        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        endpoint(&self.config.base_url, "chat/completions")
    }

    /// Converts our request to OpenAI's format.
    fn to_openai_request(&self, request: &ProviderRequest) -> OpenAIRequest {
        OpenAIRequest {
            model: self.config.model.clone(),
            messages: vec![
                OpenAIMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                OpenAIMessage {
                    role: "user".to_string(),
                    content: request.prompt.clone(),
                },
            ],
            temperature: self.config.temperature,
        }
    }
}

#[async_trait]
impl AnalysisProvider for OpenAIProvider {
    async fn analyze(&self, request: &ProviderRequest) -> Result<RawProviderResponse, ProviderError> {
        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .json(&self.to_openai_request(request))
            .send()
            .await
            .map_err(|e| map_send_error(e, self.config.timeout))?;
        let response = check_status(response).await?;

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::parse(format!("Failed to parse response: {}", e)))?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::parse("No choices in response"))?;

        debug!(
            model = %openai_response.model,
            finish_reason = ?choice.finish_reason,
            "OpenAI completion received"
        );

        let content = choice.message.content.unwrap_or_default();
        Ok(RawProviderResponse::Text(strip_code_fences(&content).to_string()))
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new(ProviderKind::OpenAI, &self.config.model)
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    model: String,
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::AnalysisText;
    use serde_json::{json, Value};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> ProviderRequest {
        ProviderRequest::new(&AnalysisText::new("Hey guys, big news!").unwrap())
    }

    fn provider_for(server: &MockServer) -> OpenAIProvider {
        OpenAIProvider::new(OpenAIConfig::new("test-key").with_base_url(server.uri())).unwrap()
    }

    fn completion(content: &str) -> Value {
        json!({
            "id": "chatcmpl-123",
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAIConfig::new("test-key")
            .with_model("gpt-4o")
            .with_base_url("https://custom.api.com")
            .with_timeout(Some(Duration::from_secs(30)))
            .with_temperature(0.2);

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn request_carries_system_role_and_prompt() {
        let provider = OpenAIProvider::new(OpenAIConfig::new("k")).unwrap();
        let body = serde_json::to_value(provider.to_openai_request(&request())).unwrap();

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
        assert_eq!(body["messages"][1]["role"], "user");
        assert!(body["messages"][1]["content"]
            .as_str()
            .unwrap()
            .contains("Hey guys, big news!"));
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn provider_info_reports_model() {
        let provider = OpenAIProvider::new(OpenAIConfig::new("k").with_model("gpt-4o")).unwrap();
        let info = provider.provider_info();
        assert_eq!(info.kind, ProviderKind::OpenAI);
        assert_eq!(info.model, "gpt-4o");
    }

    #[tokio::test]
    async fn analyze_strips_code_fence_from_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("```json\n{\"readability\": 70}\n```")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let raw = provider_for(&server).analyze(&request()).await.unwrap();

        assert_eq!(raw, RawProviderResponse::Text("{\"readability\": 70}".to_string()));
    }

    #[tokio::test]
    async fn analyze_passes_through_non_json_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("Sorry, I can't.")))
            .mount(&server)
            .await;

        let raw = provider_for(&server).analyze(&request()).await.unwrap();

        assert_eq!(raw, RawProviderResponse::Text("Sorry, I can't.".to_string()));
    }

    #[tokio::test]
    async fn server_error_carries_upstream_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(503)
                    .set_body_json(json!({ "error": { "message": "The engine is currently overloaded" } })),
            )
            .mount(&server)
            .await;

        let err = provider_for(&server).analyze(&request()).await.unwrap_err();

        assert!(matches!(err, ProviderError::Unavailable { .. }));
        assert!(err.to_string().contains("The engine is currently overloaded"));
    }

    #[tokio::test]
    async fn unauthorized_maps_to_authentication_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "error": { "message": "Incorrect API key provided" } })),
            )
            .mount(&server)
            .await;

        let err = provider_for(&server).analyze(&request()).await.unwrap_err();

        assert_eq!(
            err,
            ProviderError::AuthenticationFailed("Incorrect API key provided".to_string())
        );
    }

    #[tokio::test]
    async fn empty_choices_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "model": "gpt-4o-mini", "choices": [] })),
            )
            .mount(&server)
            .await;

        let err = provider_for(&server).analyze(&request()).await.unwrap_err();

        assert_eq!(err, ProviderError::parse("No choices in response"));
    }

    #[tokio::test]
    async fn does_not_retry_failures() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        assert!(provider_for(&server).analyze(&request()).await.is_err());
    }
}
