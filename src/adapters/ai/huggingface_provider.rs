//! Hugging Face Provider - hosted inference for sentiment-classification models.
//!
//! The model receives the user's text as `inputs` and its native JSON reply is
//! passed back unchanged. Classifier output is not analysis JSON; callers that
//! need an `AnalysisResult` detect the mismatch and score locally.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use super::http_support::{build_client, check_status, endpoint, map_send_error};
use crate::domain::analysis::ProviderKind;
use crate::ports::{
    AnalysisProvider, ProviderError, ProviderInfo, ProviderRequest, RawProviderResponse,
};

/// Configuration for the Hugging Face Inference API.
#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl HuggingFaceConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "distilbert-base-uncased-finetuned-sst-2-english".to_string(),
            base_url: "https://api-inference.huggingface.co".to_string(),
            timeout: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct HuggingFaceProvider {
    config: HuggingFaceConfig,
    client: Client,
}

impl HuggingFaceProvider {
    pub fn new(config: HuggingFaceConfig) -> Result<Self, ProviderError> {
        let client = build_client(config.timeout)?;
        Ok(Self { config, client })
    }

    fn model_url(&self) -> String {
        endpoint(&self.config.base_url, &format!("models/{}", self.config.model))
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[async_trait]
impl AnalysisProvider for HuggingFaceProvider {
    async fn analyze(&self, request: &ProviderRequest) -> Result<RawProviderResponse, ProviderError> {
        let response = self
            .client
            .post(self.model_url())
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_key.expose_secret()),
            )
            .json(&InferenceRequest {
                inputs: &request.text,
            })
            .send()
            .await
            .map_err(|e| map_send_error(e, self.config.timeout))?;
        let response = check_status(response).await?;

        let native: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::parse(format!("Failed to parse response: {}", e)))?;

        Ok(RawProviderResponse::Json(native))
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new(ProviderKind::HuggingFace, &self.config.model)
    }
}
