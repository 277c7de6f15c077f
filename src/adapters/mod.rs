//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Upstream analysis providers (OpenAI, Hugging Face, self-hosted)
//! - `gateway` - The dashboard's HTTP client for `/analyze`
//! - `http` - The gateway's REST surface

pub mod ai;
pub mod gateway;
pub mod http;

pub use ai::{build_registry, MockAnalysisProvider};
pub use gateway::HttpAnalysisGateway;
pub use http::{app, AnalysisAppState};
