//! HTTP adapters - REST API implementations.

pub mod analysis;

pub use analysis::{analysis_router, AnalysisApiError, AnalysisAppState};

use axum::error_handling::HandleErrorLayer;
use axum::{BoxError, Router};
use http::{header, HeaderValue, Method};
use std::time::Duration;
use tower::timeout::error::Elapsed;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::ServerConfig;

/// Builds the gateway application with its middleware stack.
///
/// `server.request_timeout_secs` caps a whole request; a request that runs
/// past it answers like any other upstream failure, 500 with an error body.
pub fn app(state: AnalysisAppState, config: &ServerConfig) -> Router {
    let timeout = config.request_timeout();
    analysis_router()
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(move |err: BoxError| async move {
                    middleware_error(err, timeout)
                }))
                .layer(TimeoutLayer::new(timeout)),
        )
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

fn middleware_error(err: BoxError, timeout: Duration) -> AnalysisApiError {
    if err.is::<Elapsed>() {
        warn!(timeout_secs = timeout.as_secs(), "Request timed out");
        AnalysisApiError::Upstream(format!("request timed out after {}s", timeout.as_secs()))
    } else {
        AnalysisApiError::Upstream(err.to_string())
    }
}

/// Permissive when no origins are configured, otherwise restricted to the list.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(&origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(AllowOrigin::list(origins))
}
