//! Lookup table from provider kind to its adapter.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::analysis::ProviderKind;
use crate::ports::{AnalysisProvider, ProviderError};

/// Immutable set of provider adapters shared by every request.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn AnalysisProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `provider` under the kind it reports, replacing any previous one.
    pub fn with_provider(mut self, provider: Arc<dyn AnalysisProvider>) -> Self {
        let kind = provider.provider_info().kind;
        self.providers.insert(kind, provider);
        self
    }

    pub fn get(&self, kind: ProviderKind) -> Result<Arc<dyn AnalysisProvider>, ProviderError> {
        self.providers
            .get(&kind)
            .cloned()
            .ok_or(ProviderError::NotConfigured(kind))
    }

    /// Registered kinds in declaration order.
    pub fn kinds(&self) -> Vec<ProviderKind> {
        ProviderKind::ALL
            .into_iter()
            .filter(|kind| self.providers.contains_key(kind))
            .collect()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.kinds())
            .finish()
    }
}
