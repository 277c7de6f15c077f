//! Dashboard-side adapters for reaching the analysis gateway.

mod http_gateway;

pub use http_gateway::HttpAnalysisGateway;
