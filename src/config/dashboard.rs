//! Dashboard client configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::providers::validate_url;
use crate::domain::analysis::ProviderKind;

/// Settings for the dashboard's connection to the gateway
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Base URL of the analysis gateway
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,

    /// Provider preselected in a new dashboard session
    #[serde(default)]
    pub default_provider: ProviderKind,

    /// Gateway call timeout in seconds; unset keeps the HTTP client default
    pub timeout_secs: Option<u64>,
}

impl DashboardConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_url("gateway_url", &self.gateway_url)?;
        if self.timeout_secs == Some(0) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            default_provider: ProviderKind::default(),
            timeout_secs: None,
        }
    }
}

fn default_gateway_url() -> String {
    "http://localhost:8080".to_string()
}
