//! Route definitions for the analysis gateway

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{analyze, health, AnalysisAppState};

/// Create the analysis router
///
/// # Endpoints
///
/// - `POST /analyze` - Analyze text with the selected provider
/// - `GET /health` - Liveness and configured providers
pub fn analysis_router() -> Router<AnalysisAppState> {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/health", get(health))
}
