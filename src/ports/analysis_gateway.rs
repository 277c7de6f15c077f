//! Analysis Gateway Port - the dashboard's view of the `/analyze` endpoint.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::analysis::AnalysisRequest;

/// Port through which the dashboard reaches the analysis gateway.
#[async_trait]
pub trait AnalysisGateway: Send + Sync {
    /// Returns the `data` field of a successful gateway reply.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<Value, GatewayCallError>;
}

/// Failures of a gateway call, as seen by the dashboard.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayCallError {
    /// Gateway refused the input (HTTP 400).
    #[error("gateway rejected request: {0}")]
    Rejected(String),

    /// Gateway reported an upstream failure or another non-2xx status.
    #[error("gateway error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Gateway could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// Gateway reply was not the expected JSON envelope.
    #[error("parse error: {0}")]
    Parse(String),
}
