//! Provider metadata service
//!
//! Static information about the supported backends (stateless service)

use larder_provider::get_all_provider_metadata;

use crate::types::{ProviderConfig, ProviderKind, ProviderMetadata};

/// Provider metadata service (stateless)
pub struct ProviderMetadataService;

impl ProviderMetadataService {
    /// Create Provider metadata service instance
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Get a list of all supported providers
    pub fn list_providers(&self) -> Vec<ProviderMetadata> {
        get_all_provider_metadata()
    }

    pub fn get(&self, kind: ProviderKind) -> Option<ProviderMetadata> {
        self.list_providers().into_iter().find(|m| m.kind == kind)
    }

    /// Required configuration keys of `kind` that are blank in `config`
    pub fn missing_fields(&self, kind: ProviderKind, config: &ProviderConfig) -> Vec<String> {
        self.get(kind)
            .map(|meta| config.missing_fields(&meta.required_keys()))
            .unwrap_or_default()
    }
}

impl Default for ProviderMetadataService {
    fn default() -> Self {
        Self::new()
    }
}
