//! Analysis request value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Upstream text-analysis service selected per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Hosted chat-completion model returning the full analysis JSON.
    OpenAI,
    /// Hosted sentiment classifier returning its native label/score array.
    #[default]
    HuggingFace,
    /// Self-hosted generation server.
    Llama,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::OpenAI,
        ProviderKind::HuggingFace,
        ProviderKind::Llama,
    ];

    /// Wire name, as accepted in the `provider` request field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::HuggingFace => "huggingface",
            ProviderKind::Llama => "llama",
        }
    }

    /// Whether the provider receives the templated prompt rather than raw text.
    pub fn uses_prompt(&self) -> bool {
        !matches!(self, ProviderKind::HuggingFace)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::invalid_format("provider", format!("unknown provider '{}'", s))
            })
    }
}

/// Text submitted for analysis.
///
/// Guaranteed non-blank. The original text is kept verbatim so prompts
/// embed exactly what the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnalysisText(String);

impl AnalysisText {
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("text"));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for AnalysisText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated request to analyze text with a given provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub text: AnalysisText,
    pub provider: ProviderKind,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>, provider: ProviderKind) -> Result<Self, ValidationError> {
        Ok(Self {
            text: AnalysisText::new(text)?,
            provider,
        })
    }
}
