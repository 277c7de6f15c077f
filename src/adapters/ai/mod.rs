//! Analysis Provider Adapters.
//!
//! Implementations of the AnalysisProvider port for each upstream service.
//!
//! ## Available Adapters
//!
//! - `OpenAIProvider` - Chat-completion models returning analysis JSON
//! - `HuggingFaceProvider` - Hosted sentiment classifiers (native output)
//! - `LlamaProvider` - Self-hosted generation server
//! - `MockAnalysisProvider` - Configurable mock for testing

mod http_support;
mod huggingface_provider;
mod llama_provider;
mod mock_provider;
mod openai_provider;

pub use huggingface_provider::{HuggingFaceConfig, HuggingFaceProvider};
pub use llama_provider::{LlamaConfig, LlamaProvider};
pub use mock_provider::{sample_analysis, MockAnalysisProvider, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};

use std::sync::Arc;
use tracing::info;

use crate::application::handlers::analysis::ProviderRegistry;
use crate::config::ProvidersConfig;
use crate::ports::ProviderError;

/// Builds one adapter per configured provider.
///
/// Providers without credentials are left out; requests selecting them fail
/// with `ProviderError::NotConfigured`.
pub fn build_registry(config: &ProvidersConfig) -> Result<ProviderRegistry, ProviderError> {
    let mut registry = ProviderRegistry::new();
    let timeout = config.timeout();

    if config.has_openai() {
        let key = config.openai_api_key.as_deref().unwrap_or_default();
        let openai = OpenAIConfig::new(key)
            .with_model(&config.openai_model)
            .with_base_url(&config.openai_base_url)
            .with_timeout(timeout);
        registry = registry.with_provider(Arc::new(OpenAIProvider::new(openai)?));
    }

    if config.has_huggingface() {
        let key = config.huggingface_api_key.as_deref().unwrap_or_default();
        let huggingface = HuggingFaceConfig::new(key)
            .with_model(&config.huggingface_model)
            .with_base_url(&config.huggingface_base_url)
            .with_timeout(timeout);
        registry = registry.with_provider(Arc::new(HuggingFaceProvider::new(huggingface)?));
    }

    if config.has_llama() {
        let url = config.llama_base_url.as_deref().unwrap_or_default();
        let llama = LlamaConfig::new(url).with_timeout(timeout);
        registry = registry.with_provider(Arc::new(LlamaProvider::new(llama)?));
    }

    info!(providers = ?registry.kinds(), "Analysis providers registered");
    Ok(registry)
}
