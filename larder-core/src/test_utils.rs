//! Test helpers
//!
//! In-memory mocks for the storage traits and the backend service, plus
//! factories for the services under test.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use larder_provider::{
    BackendService, Food, ProviderConfig, ProviderError, ProviderKind, ProviderMetadata, Record,
    Subscription,
};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::{ProfileStore, ServiceContext};
use crate::traits::{ConfigStore, ProfileRepository};
use crate::types::{ActiveConfig, SettingsProfile};

// ===== MockBackendService =====

struct Table<R> {
    rows: RwLock<Vec<R>>,
}

impl<R: Record> Table<R> {
    fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    async fn all(&self) -> Vec<R> {
        self.rows.read().await.clone()
    }

    async fn insert(&self, mut record: R, id: String) -> R {
        record.set_id(id);
        self.rows.write().await.push(record.clone());
        record
    }

    async fn update(&self, id: &str, record: &R) -> Result<R, ProviderError> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| ProviderError::RecordNotFound {
                provider: "mock".to_string(),
                record_id: id.to_string(),
                raw_message: None,
            })?;
        *row = record.clone();
        Ok(row.clone())
    }

    async fn remove(&self, id: &str) -> bool {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|r| r.id() != id);
        rows.len() != before
    }
}

/// In-memory backend. Deleting an unknown id answers `Ok(false)`; ids marked
/// with [`fail_delete_for`](Self::fail_delete_for) answer an API error.
pub struct MockBackendService {
    foods: Table<Food>,
    subscriptions: Table<Subscription>,
    failing_deletes: RwLock<HashSet<String>>,
    next_id: AtomicUsize,
}

impl MockBackendService {
    pub fn new() -> Self {
        Self {
            foods: Table::new(),
            subscriptions: Table::new(),
            failing_deletes: RwLock::new(HashSet::new()),
            next_id: AtomicUsize::new(1),
        }
    }

    pub async fn fail_delete_for(&self, id: &str) {
        self.failing_deletes.write().await.insert(id.to_string());
    }

    pub async fn food_ids(&self) -> Vec<String> {
        self.foods.all().await.into_iter().map(|f| f.id).collect()
    }

    fn allocate_id(&self) -> String {
        format!("mock-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn check_delete(&self, id: &str) -> Result<(), ProviderError> {
        if self.failing_deletes.read().await.contains(id) {
            return Err(ProviderError::Api {
                provider: "mock".to_string(),
                status: Some(500),
                raw_code: None,
                raw_message: format!("cannot delete {id}"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl BackendService for MockBackendService {
    fn service_name(&self) -> &'static str {
        "Mock"
    }

    fn service_kind(&self) -> ProviderKind {
        ProviderKind::Appwrite
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            kind: ProviderKind::Appwrite,
            name: "Mock".to_string(),
            description: "In-memory test backend".to_string(),
            required_fields: Vec::new(),
        }
    }

    async fn initialize(&self) -> bool {
        true
    }

    async fn test_connection(&self) -> bool {
        true
    }

    async fn get_all_foods(&self) -> larder_provider::Result<Vec<Food>> {
        Ok(self.foods.all().await)
    }

    async fn create_food(&self, food: &Food) -> larder_provider::Result<Food> {
        Ok(self.foods.insert(food.clone(), self.allocate_id()).await)
    }

    async fn update_food(&self, id: &str, food: &Food) -> larder_provider::Result<Food> {
        self.foods.update(id, food).await
    }

    async fn delete_food(&self, id: &str) -> larder_provider::Result<bool> {
        self.check_delete(id).await?;
        Ok(self.foods.remove(id).await)
    }

    async fn get_all_subscriptions(&self) -> larder_provider::Result<Vec<Subscription>> {
        Ok(self.subscriptions.all().await)
    }

    async fn create_subscription(
        &self,
        subscription: &Subscription,
    ) -> larder_provider::Result<Subscription> {
        Ok(self
            .subscriptions
            .insert(subscription.clone(), self.allocate_id())
            .await)
    }

    async fn update_subscription(
        &self,
        id: &str,
        subscription: &Subscription,
    ) -> larder_provider::Result<Subscription> {
        self.subscriptions.update(id, subscription).await
    }

    async fn delete_subscription(&self, id: &str) -> larder_provider::Result<bool> {
        self.check_delete(id).await?;
        Ok(self.subscriptions.remove(id).await)
    }
}

// ===== MockProfileRepository =====

pub struct MockProfileRepository {
    profiles: RwLock<Vec<SettingsProfile>>,
    /// When Some, save_all fails with this message
    save_error: RwLock<Option<String>>,
    saves: RwLock<usize>,
    loads: RwLock<usize>,
}

impl MockProfileRepository {
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(Vec::new()),
            save_error: RwLock::new(None),
            saves: RwLock::new(0),
            loads: RwLock::new(0),
        }
    }

    pub async fn seed(&self, profiles: Vec<SettingsProfile>) {
        *self.profiles.write().await = profiles;
    }

    pub async fn set_save_error(&self, err: Option<String>) {
        *self.save_error.write().await = err;
    }

    pub async fn saved_profiles(&self) -> Vec<SettingsProfile> {
        self.profiles.read().await.clone()
    }

    pub async fn save_count(&self) -> usize {
        *self.saves.read().await
    }

    pub async fn load_count(&self) -> usize {
        *self.loads.read().await
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn load_all(&self) -> CoreResult<Vec<SettingsProfile>> {
        *self.loads.write().await += 1;
        Ok(self.profiles.read().await.clone())
    }

    async fn save_all(&self, profiles: &[SettingsProfile]) -> CoreResult<()> {
        if let Some(ref msg) = *self.save_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        *self.profiles.write().await = profiles.to_vec();
        *self.saves.write().await += 1;
        Ok(())
    }
}

// ===== MockConfigStore =====

pub struct MockConfigStore {
    config: RwLock<ActiveConfig>,
}

impl MockConfigStore {
    pub fn new() -> Self {
        Self {
            config: RwLock::new(ActiveConfig::default()),
        }
    }
}

#[async_trait]
impl ConfigStore for MockConfigStore {
    async fn load(&self) -> CoreResult<ActiveConfig> {
        Ok(self.config.read().await.clone())
    }

    async fn save(&self, config: &ActiveConfig) -> CoreResult<()> {
        *self.config.write().await = config.clone();
        Ok(())
    }
}

// ===== Factories =====

pub fn create_test_context() -> (
    Arc<ServiceContext>,
    Arc<MockProfileRepository>,
    Arc<MockConfigStore>,
) {
    let profile_repo = Arc::new(MockProfileRepository::new());
    let config_store = Arc::new(MockConfigStore::new());
    let ctx = Arc::new(ServiceContext::new(
        profile_repo.clone(),
        config_store.clone(),
    ));
    (ctx, profile_repo, config_store)
}

pub fn create_test_profile_store() -> (
    ProfileStore,
    Arc<MockProfileRepository>,
    Arc<MockConfigStore>,
) {
    let (ctx, profile_repo, config_store) = create_test_context();
    (ProfileStore::new(ctx), profile_repo, config_store)
}

pub fn test_profile(name: &str) -> SettingsProfile {
    SettingsProfile::new(
        name,
        ProviderKind::Appwrite,
        ProviderConfig {
            url: "https://cloud.appwrite.io/v1".to_string(),
            project_id: "pantry".to_string(),
            api_key: "secret".to_string(),
            database_id: "main".to_string(),
            food_collection: "foods".to_string(),
            subscription_collection: "subscriptions".to_string(),
        },
        "",
    )
}

pub fn test_food(name: &str) -> Food {
    Food {
        food_name: name.to_string(),
        category: "pantry".to_string(),
        quantity: 1.0,
        purchase_date: "2026-01-01".to_string(),
        expiry_date: "2026-06-01".to_string(),
        price: 2.5,
        ..Default::default()
    }
}

pub fn test_subscription(name: &str) -> Subscription {
    Subscription {
        name: name.to_string(),
        price: 9.99,
        billing_cycle: "monthly".to_string(),
        start_date: "2026-01-01".to_string(),
        next_payment_date: "2026-02-01".to_string(),
        category: "media".to_string(),
        ..Default::default()
    }
}
