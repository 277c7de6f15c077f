//! HTTP adapter for the analysis gateway.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{AnalysisApiError, AnalysisAppState};
pub use routes::analysis_router;
