//! Failures while turning a gateway reply into an analysis result.

use thiserror::Error;

/// Why a gateway reply could not be used as an [`AnalysisResult`](super::AnalysisResult).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReplyError {
    /// The reply text was not JSON at all.
    #[error("reply is not valid JSON: {0}")]
    Parse(String),

    /// The reply was JSON but did not satisfy the analysis schema.
    #[error("reply does not match the analysis schema: {0}")]
    SchemaMismatch(String),
}

impl ReplyError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::SchemaMismatch(message.into())
    }
}
