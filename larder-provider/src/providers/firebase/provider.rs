//! Firebase `BackendService` implementation

use async_trait::async_trait;
use reqwest::Method;

use crate::error::Result;
use crate::traits::{BackendService, ErrorContext, ProviderErrorMapper};
use crate::types::{
    ConfigField, ConfigKey, Food, ProviderKind, ProviderMetadata, RecordKind, Subscription,
};

use super::FirebaseService;

#[async_trait]
impl BackendService for FirebaseService {
    fn service_name(&self) -> &'static str {
        self.provider_name()
    }

    fn service_kind(&self) -> ProviderKind {
        ProviderKind::Firebase
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            kind: ProviderKind::Firebase,
            name: "Firebase Realtime Database".to_string(),
            description: "Records stored as children of a database path".to_string(),
            required_fields: vec![
                ConfigField::text(
                    ConfigKey::Url,
                    "Database URL",
                    Some("https://<project>-default-rtdb.firebaseio.com"),
                ),
                ConfigField::password(ConfigKey::ApiKey, "Auth Token")
                    .with_help("Database secret or a Firebase ID token"),
                ConfigField::text(ConfigKey::FoodCollection, "Food Path", Some("foods")),
                ConfigField::text(
                    ConfigKey::SubscriptionCollection,
                    "Subscription Path",
                    Some("subscriptions"),
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
        let url = self.node_url(RecordKind::Food, None, Some("shallow=true"));
        match self.request(Method::GET, &url, None, ErrorContext::default()).await {
            Ok(_) => true,
            Err(e) => {
                log::warn!("[firebase] Connection test failed: {e}");
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
