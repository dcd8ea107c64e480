//! Application bootstrap for Larder.
//!
//! Provides `AppState` (service container) and `AppStateBuilder` (adapter
//! injection). Adapters that are not supplied default to the JSON files in
//! the data directory.

pub mod adapters;
pub mod paths;

use std::path::PathBuf;
use std::sync::Arc;

use larder_core::error::CoreResult;
use larder_core::services::{
    ActiveServiceHandle, CrudManager, ProfileStore, ProviderMetadataService, ServiceContext,
};
use larder_core::traits::{ConfigStore, ProfileRepository};
use larder_provider::BackendService;

use crate::adapters::{JsonConfigStore, JsonProfileRepository};

/// Application state.
///
/// Every frontend constructs this once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Service context (holds the storage adapters)
    pub ctx: Arc<ServiceContext>,
    /// Settings profiles
    pub profile_store: Arc<ProfileStore>,
    /// Backend service currently in use
    pub active_service: ActiveServiceHandle,
    /// Provider metadata service
    pub provider_metadata_service: ProviderMetadataService,
}

impl AppState {
    /// A record manager on the active service.
    ///
    /// Installs a service for the current configuration first if none is active.
    pub async fn crud_manager(&self) -> CoreResult<CrudManager> {
        let service = match self.active_service.current().await {
            Some(service) => service,
            None => {
                let config = self.ctx.current_config().await?;
                self.active_service.reload(&config).await
            }
        };
        Ok(CrudManager::new(service))
    }

    /// Make a stored profile the active configuration and switch to its backend.
    pub async fn activate_profile(&self, id: &str) -> CoreResult<Arc<dyn BackendService>> {
        let config = self.profile_store.load_into_current_config(id).await?;
        Ok(self.active_service.reload(&config).await)
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Optional
/// - `data_dir`: defaults to [`paths::default_data_dir`]
/// - `profile_repository`: defaults to `JsonProfileRepository` in the data dir
/// - `config_store`: defaults to `JsonConfigStore` in the data dir
/// - `active_service`: defaults to an empty handle
pub struct AppStateBuilder {
    data_dir: Option<PathBuf>,
    profile_repository: Option<Arc<dyn ProfileRepository>>,
    config_store: Option<Arc<dyn ConfigStore>>,
    active_service: Option<ActiveServiceHandle>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data_dir: None,
            profile_repository: None,
            config_store: None,
            active_service: None,
        }
    }

    #[must_use]
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn profile_repository(mut self, repo: Arc<dyn ProfileRepository>) -> Self {
        self.profile_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn config_store(mut self, store: Arc<dyn ConfigStore>) -> Self {
        self.config_store = Some(store);
        self
    }

    #[must_use]
    pub fn active_service(mut self, handle: ActiveServiceHandle) -> Self {
        self.active_service = Some(handle);
        self
    }

    /// Build the `AppState`. Performs no I/O.
    #[must_use]
    pub fn build(self) -> AppState {
        let data_dir = self.data_dir.unwrap_or_else(paths::default_data_dir);

        let profile_repository = self
            .profile_repository
            .unwrap_or_else(|| Arc::new(JsonProfileRepository::new(&data_dir)));
        let config_store = self
            .config_store
            .unwrap_or_else(|| Arc::new(JsonConfigStore::new(&data_dir)));

        let ctx = Arc::new(ServiceContext::new(profile_repository, config_store));
        let profile_store = Arc::new(ProfileStore::new(Arc::clone(&ctx)));

        log::debug!("Application data directory: {}", data_dir.display());

        AppState {
            ctx,
            profile_store,
            active_service: self.active_service.unwrap_or_default(),
            provider_metadata_service: ProviderMetadataService::new(),
        }
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
