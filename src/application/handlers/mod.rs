//! Application handlers.
//!
//! - `analysis` - gateway side: validate, dispatch to a provider, pass the reply through
//! - `dashboard` - client side: drive the dashboard state and fall back locally

pub mod analysis;
pub mod dashboard;

pub use analysis::{
    AnalyzeTextCommand, AnalyzeTextError, AnalyzeTextHandler, AnalyzeTextResult, ProviderRegistry,
};
pub use dashboard::{DashboardSession, EMPTY_INPUT_MESSAGE};
