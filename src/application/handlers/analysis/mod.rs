//! Gateway-side analysis handlers.

mod analyze_text;
mod provider_registry;

pub use analyze_text::{AnalyzeTextCommand, AnalyzeTextError, AnalyzeTextHandler, AnalyzeTextResult};
pub use provider_registry::ProviderRegistry;
