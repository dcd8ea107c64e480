//! Shared handle to the currently active backend service

use std::sync::Arc;

use larder_provider::{BackendService, create_service};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::types::ActiveConfig;

/// The backend service the application currently talks to.
///
/// Clones share the same slot.
#[derive(Clone, Default)]
pub struct ActiveServiceHandle {
    service: Arc<RwLock<Option<Arc<dyn BackendService>>>>,
}

impl ActiveServiceHandle {
    /// Create an empty handle
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active service
    pub async fn install(&self, service: Arc<dyn BackendService>) {
        log::info!("Installing {} as the active service", service.service_name());
        *self.service.write().await = Some(service);
    }

    pub async fn current(&self) -> Option<Arc<dyn BackendService>> {
        self.service.read().await.clone()
    }

    /// The active service, or `NoActiveService` when none is installed
    pub async fn require(&self) -> CoreResult<Arc<dyn BackendService>> {
        self.current().await.ok_or(CoreError::NoActiveService)
    }

    pub async fn clear(&self) {
        self.service.write().await.take();
    }

    /// Build a service for `config`, install it and return it
    pub async fn reload(&self, config: &ActiveConfig) -> Arc<dyn BackendService> {
        let service = create_service(config.provider_kind, config.connection.clone());
        self.install(service.clone()).await;
        service
    }
}
