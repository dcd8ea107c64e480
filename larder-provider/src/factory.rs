//! Service factory functions and metadata.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::{
    AppwriteService, CouchDbService, DirectusService, FirebaseService, ParseService,
    SupabaseService,
};
use crate::traits::BackendService;
use crate::types::{ProviderConfig, ProviderKind, ProviderMetadata};

/// Creates a fresh, uninitialized [`BackendService`] for `kind`.
///
/// Construction performs no I/O and cannot fail; configuration problems
/// surface as `ConfigurationMissing` from the first operation.
///
/// # Examples
///
/// ```rust
/// use larder_provider::{create_service, ProviderConfig, ProviderKind};
///
/// let service = create_service(ProviderKind::Supabase, ProviderConfig::default());
/// assert_eq!(service.service_kind(), ProviderKind::Supabase);
/// ```
pub fn create_service(kind: ProviderKind, config: ProviderConfig) -> Arc<dyn BackendService> {
    log::debug!("Creating {kind} service");
    match kind {
        ProviderKind::Appwrite => Arc::new(AppwriteService::new(config)),
        ProviderKind::CouchDb => Arc::new(CouchDbService::new(config)),
        ProviderKind::Firebase => Arc::new(FirebaseService::new(config)),
        ProviderKind::Directus => Arc::new(DirectusService::new(config)),
        ProviderKind::Parse => Arc::new(ParseService::new(config)),
        ProviderKind::Supabase => Arc::new(SupabaseService::new(config)),
    }
}

/// Creates a service from a provider kind name (case-insensitive).
///
/// Fails with [`ProviderError::UnsupportedKind`](crate::ProviderError::UnsupportedKind)
/// for names outside the supported set.
pub fn create_service_by_name(
    name: &str,
    config: ProviderConfig,
) -> Result<Arc<dyn BackendService>> {
    let kind: ProviderKind = name.parse()?;
    Ok(create_service(kind, config))
}

/// Returns metadata for every supported provider, in [`ProviderKind::ALL`] order.
///
/// Useful for building dynamic UIs that enumerate available providers
/// and their required configuration fields.
pub fn get_all_provider_metadata() -> Vec<ProviderMetadata> {
    vec![
        AppwriteService::metadata(),
        CouchDbService::metadata(),
        FirebaseService::metadata(),
        DirectusService::metadata(),
        ParseService::metadata(),
        SupabaseService::metadata(),
    ]
}
