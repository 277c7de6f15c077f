//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    AnalyzeTextCommand, AnalyzeTextError, AnalyzeTextHandler, AnalyzeTextResult, DashboardSession,
    ProviderRegistry, EMPTY_INPUT_MESSAGE,
};
