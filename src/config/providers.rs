//! Upstream provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::analysis::ProviderKind;

/// Upstream provider configuration
///
/// API keys are only checked for presence when a request selects the
/// provider; an unconfigured provider answers with an upstream error.
#[derive(Debug, Clone, Deserialize)]
pub struct ProvidersConfig {
    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// OpenAI-compatible API base URL
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Chat-completion model
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Hugging Face Inference API token
    pub huggingface_api_key: Option<String>,

    /// Hugging Face Inference API base URL
    #[serde(default = "default_huggingface_base_url")]
    pub huggingface_base_url: String,

    /// Sentiment-classification model
    #[serde(default = "default_huggingface_model")]
    pub huggingface_model: String,

    /// Base URL of a self-hosted generation server
    pub llama_base_url: Option<String>,

    /// Upstream timeout in seconds; unset keeps the HTTP client default
    pub timeout_secs: Option<u64>,
}

impl ProvidersConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Check if Hugging Face is configured
    pub fn has_huggingface(&self) -> bool {
        self.huggingface_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Check if the self-hosted server is configured
    pub fn has_llama(&self) -> bool {
        self.llama_base_url.as_ref().is_some_and(|u| !u.is_empty())
    }

    /// Providers that can serve requests
    pub fn configured(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                ProviderKind::OpenAI => self.has_openai(),
                ProviderKind::HuggingFace => self.has_huggingface(),
                ProviderKind::Llama => self.has_llama(),
            })
            .collect()
    }

    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_url("openai_base_url", &self.openai_base_url)?;
        validate_url("huggingface_base_url", &self.huggingface_base_url)?;
        if let Some(url) = self.llama_base_url.as_deref().filter(|u| !u.is_empty()) {
            validate_url("llama_base_url", url)?;
        }
        if self.timeout_secs == Some(0) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

pub(crate) fn validate_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        })
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: default_openai_base_url(),
            openai_model: default_openai_model(),
            huggingface_api_key: None,
            huggingface_base_url: default_huggingface_base_url(),
            huggingface_model: default_huggingface_model(),
            llama_base_url: None,
            timeout_secs: None,
        }
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_huggingface_base_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_huggingface_model() -> String {
    "distilbert-base-uncased-finetuned-sst-2-english".to_string()
}
