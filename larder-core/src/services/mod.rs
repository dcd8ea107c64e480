//! Business logic service layer

mod active_service;
mod crud_manager;
mod profile_store;
mod provider_metadata_service;

pub use active_service::ActiveServiceHandle;
pub use crud_manager::CrudManager;
pub use profile_store::{MAX_PROFILE_NAME_LEN, MAX_PROFILES, ProfileStore};
pub use provider_metadata_service::ProviderMetadataService;

use std::sync::Arc;

use larder_provider::{BackendService, create_service};

use crate::error::CoreResult;
use crate::traits::{ConfigStore, ProfileRepository};
use crate::types::ActiveConfig;

/// Service context - holds all storage dependencies
///
/// The platform layer creates it and injects its own storage implementations.
pub struct ServiceContext {
    /// Profile persistence
    pub profile_repository: Arc<dyn ProfileRepository>,
    /// Active configuration persistence
    pub config_store: Arc<dyn ConfigStore>,
}

impl ServiceContext {
    /// Create a service context
    #[must_use]
    pub fn new(
        profile_repository: Arc<dyn ProfileRepository>,
        config_store: Arc<dyn ConfigStore>,
    ) -> Self {
        Self {
            profile_repository,
            config_store,
        }
    }

    /// The active configuration as currently persisted
    pub async fn current_config(&self) -> CoreResult<ActiveConfig> {
        self.config_store.load().await
    }

    /// Build a backend service for the active configuration's provider kind
    pub async fn create_service_for_current_config(
        &self,
    ) -> CoreResult<Arc<dyn BackendService>> {
        let config = self.current_config().await?;
        Ok(create_service(config.provider_kind, config.connection))
    }
}
