//! AnalyzeTextHandler - Forward text to the selected provider.
//!
//! The handler validates the text, templates the prompt, makes exactly one
//! upstream call and hands the provider payload back unchanged.

use serde_json::Value;
use tracing::{debug, warn};

use super::provider_registry::ProviderRegistry;
use crate::domain::analysis::{AnalysisText, ProviderKind};
use crate::domain::foundation::{AnalysisId, ValidationError};
use crate::ports::{ProviderError, ProviderRequest, RawProviderResponse};

/// Command to analyze a piece of text.
#[derive(Debug, Clone)]
pub struct AnalyzeTextCommand {
    pub text: String,
    pub provider: ProviderKind,
}

/// Result of a successful analysis call.
#[derive(Debug, Clone)]
pub struct AnalyzeTextResult {
    /// Correlates log lines for one request.
    pub analysis_id: AnalysisId,
    pub provider: ProviderKind,
    pub response: RawProviderResponse,
}

impl AnalyzeTextResult {
    /// The payload for the `data` field of the reply.
    pub fn into_data(self) -> Value {
        self.response.into_value()
    }
}

/// Error type for text analysis.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalyzeTextError {
    /// Text was missing or blank; no upstream call was made.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Upstream call failed or the provider is not configured.
    #[error("{0}")]
    Upstream(#[from] ProviderError),
}

/// Handler for analysis requests.
pub struct AnalyzeTextHandler {
    registry: ProviderRegistry,
}

impl AnalyzeTextHandler {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    pub async fn handle(&self, cmd: AnalyzeTextCommand) -> Result<AnalyzeTextResult, AnalyzeTextError> {
        let text = AnalysisText::new(cmd.text)?;
        let analysis_id = AnalysisId::new();

        let provider = self.registry.get(cmd.provider).map_err(|err| {
            warn!(%analysis_id, provider = %cmd.provider, "Provider not configured");
            err
        })?;

        let request = ProviderRequest::new(&text);
        debug!(
            %analysis_id,
            provider = %cmd.provider,
            model = %provider.provider_info().model,
            chars = text.as_str().len(),
            templated = cmd.provider.uses_prompt(),
            "Dispatching analysis"
        );

        match provider.analyze(&request).await {
            Ok(response) => {
                debug!(%analysis_id, provider = %cmd.provider, "Analysis completed");
                Ok(AnalyzeTextResult {
                    analysis_id,
                    provider: cmd.provider,
                    response,
                })
            }
            Err(err) => {
                warn!(%analysis_id, provider = %cmd.provider, error = %err, "Upstream analysis failed");
                Err(err.into())
            }
        }
    }
}
