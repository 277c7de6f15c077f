//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AnalysisProvider` - Upstream text-analysis services (gateway side)
//! - `AnalysisGateway` - The `/analyze` endpoint (dashboard side)

mod analysis_gateway;
mod analysis_provider;

pub use analysis_gateway::{AnalysisGateway, GatewayCallError};
pub use analysis_provider::{
    AnalysisProvider, ProviderError, ProviderInfo, ProviderRequest, RawProviderResponse,
};
