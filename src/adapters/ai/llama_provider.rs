//! Self-hosted generation server provider.
//!
//! Talks to a local text-generation service exposing `POST /generate` with
//! `{"prompt": ...}` and answering `{"result": ...}`. Such servers commonly echo
//! the prompt ahead of the completion, so the echo is removed before the
//! code-fence cleanup.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::http_support::{build_client, check_status, endpoint, map_send_error};
use crate::domain::analysis::{strip_code_fences, ProviderKind};
use crate::ports::{
    AnalysisProvider, ProviderError, ProviderInfo, ProviderRequest, RawProviderResponse,
};

#[derive(Debug, Clone)]
pub struct LlamaConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl LlamaConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct LlamaProvider {
    config: LlamaConfig,
    client: Client,
}

impl LlamaProvider {
    pub fn new(config: LlamaConfig) -> Result<Self, ProviderError> {
        let client = build_client(config.timeout)?;
        Ok(Self { config, client })
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    result: String,
}

/// Extracts the model's answer from a generation that may echo the prompt.
///
/// An exact echo is cut off. When the echo was re-tokenized and no longer
/// matches byte for byte, the answer is taken from the last code fence, or
/// else the JSON object that ends the generation.
fn clean_generation<'a>(generated: &'a str, prompt: &str) -> &'a str {
    if let Some(completion) = generated.strip_prefix(prompt) {
        return strip_code_fences(completion);
    }
    last_fenced_block(generated)
        .or_else(|| trailing_json_object(generated))
        .unwrap_or_else(|| strip_code_fences(generated))
}

fn last_fenced_block(text: &str) -> Option<&str> {
    let last = text.rfind("```")?;
    let block = match text[..last].rfind("```") {
        Some(open) => &text[open..last + 3],
        // Unclosed fence, typically a generation cut at the token limit.
        None => &text[last..],
    };
    Some(strip_code_fences(block))
}

/// The outermost well-formed JSON object ending at the last `}`.
fn trailing_json_object(text: &str) -> Option<&str> {
    let end = text.rfind('}')? + 1;
    text[..end]
        .match_indices('{')
        .map(|(start, _)| &text[start..end])
        .find(|candidate| serde_json::from_str::<serde_json::Value>(candidate).is_ok())
}

#[async_trait]
impl AnalysisProvider for LlamaProvider {
    async fn analyze(&self, request: &ProviderRequest) -> Result<RawProviderResponse, ProviderError> {
        let response = self
            .client
            .post(endpoint(&self.config.base_url, "generate"))
            .json(&GenerateRequest {
                prompt: &request.prompt,
            })
            .send()
            .await
            .map_err(|e| map_send_error(e, self.config.timeout))?;
        let response = check_status(response).await?;

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::parse(format!("Failed to parse response: {}", e)))?;

        Ok(RawProviderResponse::Text(
            clean_generation(&generated.result, &request.prompt).to_string(),
        ))
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new(ProviderKind::Llama, "self-hosted")
    }
}
