//! Active configuration

use serde::{Deserialize, Serialize};

use larder_provider::{ProviderConfig, ProviderKind};

/// The provider selection and connection settings currently in use.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveConfig {
    /// Selected backend kind
    #[serde(default)]
    pub provider_kind: ProviderKind,
    /// Connection settings for the selected backend
    #[serde(flatten)]
    pub connection: ProviderConfig,
}
