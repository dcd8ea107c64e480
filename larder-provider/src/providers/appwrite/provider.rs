//! Appwrite `BackendService` implementation

use async_trait::async_trait;
use reqwest::Method;

use crate::error::Result;
use crate::traits::{BackendService, ErrorContext, ProviderErrorMapper};
use crate::types::{
    ConfigField, ConfigKey, Food, ProviderKind, ProviderMetadata, RecordKind, Subscription,
};

use super::AppwriteService;

impl AppwriteService {
    async fn check_connection(&self) -> Result<()> {
        self.request(Method::GET, &self.database_url(), None, ErrorContext::default())
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl BackendService for AppwriteService {
    fn service_name(&self) -> &'static str {
        self.provider_name()
    }

    fn service_kind(&self) -> ProviderKind {
        ProviderKind::Appwrite
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            kind: ProviderKind::Appwrite,
            name: "Appwrite".to_string(),
            description: "Appwrite Databases document collections".to_string(),
            required_fields: vec![
                ConfigField::text(
                    ConfigKey::Url,
                    "Endpoint",
                    Some("https://cloud.appwrite.io/v1"),
                ),
                ConfigField::text(ConfigKey::ProjectId, "Project ID", None),
                ConfigField::password(ConfigKey::ApiKey, "API Key")
                    .with_help("Server key with documents.read and documents.write scopes"),
                ConfigField::text(ConfigKey::DatabaseId, "Database ID", None),
                ConfigField::text(ConfigKey::FoodCollection, "Food Collection ID", None),
                ConfigField::text(
                    ConfigKey::SubscriptionCollection,
                    "Subscription Collection ID",
                    None,
                ),
            ],
        }
    }

    async fn initialize(&self) -> bool {
        if let Err(e) = self.ensure_configured() {
            log::warn!("{e}");
            return false;
        }
        if let Err(e) = self.client.get(self.provider_name()) {
            log::error!("{e}");
            return false;
        }
        self.test_connection().await
    }

    async fn test_connection(&self) -> bool {
        match self.check_connection().await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[appwrite] Connection test failed: {e}");
                false
            }
        }
    }

    async fn get_all_foods(&self) -> Result<Vec<Food>> {
        self.list().await
    }

    async fn create_food(&self, food: &Food) -> Result<Food> {
        self.create(food).await
    }

    async fn update_food(&self, id: &str, food: &Food) -> Result<Food> {
        self.update(id, food).await
    }

    async fn delete_food(&self, id: &str) -> Result<bool> {
        self.delete(RecordKind::Food, id).await
    }

    async fn get_all_subscriptions(&self) -> Result<Vec<Subscription>> {
        self.list().await
    }

    async fn create_subscription(&self, subscription: &Subscription) -> Result<Subscription> {
        self.create(subscription).await
    }

    async fn update_subscription(
        &self,
        id: &str,
        subscription: &Subscription,
    ) -> Result<Subscription> {
        self.update(id, subscription).await
    }

    async fn delete_subscription(&self, id: &str) -> Result<bool> {
        self.delete(RecordKind::Subscription, id).await
    }
}
