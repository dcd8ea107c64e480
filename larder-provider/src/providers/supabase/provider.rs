//! Supabase `BackendService` implementation

use async_trait::async_trait;
use reqwest::Method;

use crate::error::Result;
use crate::traits::{BackendService, ErrorContext, ProviderErrorMapper};
use crate::types::{
    ConfigField, ConfigKey, Food, ProviderKind, ProviderMetadata, RecordKind, Subscription,
};

use super::SupabaseService;

#[async_trait]
impl BackendService for SupabaseService {
    fn service_name(&self) -> &'static str {
        self.provider_name()
    }

    fn service_kind(&self) -> ProviderKind {
        ProviderKind::Supabase
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            kind: ProviderKind::Supabase,
            name: "Supabase".to_string(),
            description: "PostgreSQL tables through the Supabase REST API".to_string(),
            required_fields: vec![
                ConfigField::text(
                    ConfigKey::Url,
                    "Project URL",
                    Some("https://<project>.supabase.co"),
                ),
                ConfigField::password(ConfigKey::ApiKey, "API Key")
                    .with_help("anon or service_role key"),
                ConfigField::text(ConfigKey::FoodCollection, "Food Table", Some("foods")),
                ConfigField::text(
                    ConfigKey::SubscriptionCollection,
                    "Subscription Table",
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
        let url = format!("{}?select=id&limit=1", self.table_url(RecordKind::Food));
        match self.request(Method::GET, &url, None, ErrorContext::default()).await {
            Ok(_) => true,
            Err(e) => {
                log::warn!("[supabase] Connection test failed: {e}");
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
