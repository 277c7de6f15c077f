//! HTTP handlers for the analysis gateway.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::application::handlers::analysis::{
    AnalyzeTextCommand, AnalyzeTextError, AnalyzeTextHandler, ProviderRegistry,
};

use super::dto::{AnalyzeRequest, AnalyzeResponse, ErrorResponse, HealthResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state: the immutable provider adapters.
#[derive(Clone, Debug)]
pub struct AnalysisAppState {
    pub registry: ProviderRegistry,
}

impl AnalysisAppState {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    pub fn analyze_text_handler(&self) -> AnalyzeTextHandler {
        AnalyzeTextHandler::new(self.registry.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// Analyze text with the selected provider
///
/// POST /analyze
pub async fn analyze(
    State(app_state): State<AnalysisAppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AnalysisApiError> {
    let Json(req) = payload?;

    let text = req
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or(AnalysisApiError::MissingText)?;

    let cmd = AnalyzeTextCommand {
        text,
        provider: req.provider,
    };

    let handler = app_state.analyze_text_handler();
    let result = handler.handle(cmd).await?;

    Ok(Json(AnalyzeResponse {
        data: result.into_data(),
    }))
}

/// Liveness plus the providers this instance can serve
///
/// GET /health
pub async fn health(State(app_state): State<AnalysisAppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        providers: app_state.registry.kinds(),
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Failures of `POST /analyze` as seen by HTTP clients.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisApiError {
    /// `text` absent or blank.
    MissingText,
    /// Body was not JSON, had the wrong shape, or named an unknown provider.
    BadBody(String),
    /// Provider failed, timed out, or is not configured.
    Upstream(String),
}

impl From<JsonRejection> for AnalysisApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection.body_text(), "Rejected malformed analyze body");
        Self::BadBody(rejection.body_text())
    }
}

impl From<AnalyzeTextError> for AnalysisApiError {
    fn from(err: AnalyzeTextError) -> Self {
        match err {
            AnalyzeTextError::Validation(_) => Self::MissingText,
            AnalyzeTextError::Upstream(err) => Self::Upstream(err.to_string()),
        }
    }
}

impl IntoResponse for AnalysisApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AnalysisApiError::MissingText => (StatusCode::BAD_REQUEST, ErrorResponse::missing_text()),
            AnalysisApiError::BadBody(message) => (StatusCode::BAD_REQUEST, ErrorResponse::new(message)),
            AnalysisApiError::Upstream(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(message))
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::ProviderKind;
    use crate::domain::foundation::ValidationError;
    use crate::ports::ProviderError;

    #[test]
    fn blank_text_maps_to_missing_text() {
        let err = AnalysisApiError::from(AnalyzeTextError::Validation(ValidationError::empty_field("text")));
        assert_eq!(err, AnalysisApiError::MissingText);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_failure_maps_to_server_error() {
        let err = AnalysisApiError::from(AnalyzeTextError::Upstream(ProviderError::NotConfigured(
            ProviderKind::Llama,
        )));
        assert_eq!(
            err,
            AnalysisApiError::Upstream("provider 'llama' is not configured".to_string())
        );
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
