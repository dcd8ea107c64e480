//! `CouchDB` `BackendService` implementation

use async_trait::async_trait;
use reqwest::Method;

use crate::error::Result;
use crate::traits::{BackendService, ErrorContext, ProviderErrorMapper};
use crate::types::{
    ConfigField, ConfigKey, Food, ProviderKind, ProviderMetadata, RecordKind, Subscription,
};

use super::CouchDbService;

#[async_trait]
impl BackendService for CouchDbService {
    fn service_name(&self) -> &'static str {
        self.provider_name()
    }

    fn service_kind(&self) -> ProviderKind {
        ProviderKind::CouchDb
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            kind: ProviderKind::CouchDb,
            name: "Apache CouchDB".to_string(),
            description: "One CouchDB database per record kind".to_string(),
            required_fields: vec![
                ConfigField::text(ConfigKey::Url, "Server URL", Some("http://localhost:5984")),
                ConfigField::text(ConfigKey::ProjectId, "Username", None),
                ConfigField::password(ConfigKey::ApiKey, "Password"),
                ConfigField::text(ConfigKey::FoodCollection, "Food Database", Some("foods")),
                ConfigField::text(
                    ConfigKey::SubscriptionCollection,
                    "Subscription Database",
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
        let url = self.database_url(RecordKind::Food);
        match self.request(Method::GET, &url, None, ErrorContext::default()).await {
            Ok(_) => true,
            Err(e) => {
                log::warn!("[couchdb] Connection test failed: {e}");
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::providers::common::from_native;
    use crate::providers::couchdb::fields;
    use crate::types::ProviderConfig;
    use serde_json::json;

    #[test]
    fn database_url_encodes_name() {
        let service = CouchDbService::new(ProviderConfig {
            url: "http://localhost:5984".to_string(),
            subscription_collection: "larder/subs".to_string(),
            ..Default::default()
        });
        assert_eq!(
            service.database_url(RecordKind::Subscription),
            "http://localhost:5984/larder%2Fsubs"
        );
    }

    #[test]
    fn document_keeps_canonical_names() {
        let doc = json!({
            "_id": "a1",
            "_rev": "1-abc",
            "name": "Video",
            "price": 12.5,
            "billingCycle": "monthly",
            "createdAt": "2024-01-01T00:00:00Z"
        });
        let sub: Subscription = from_native(
            "couchdb",
            doc.as_object().unwrap(),
            fields(RecordKind::Subscription),
        )
        .unwrap();
        assert_eq!(sub.id, "a1");
        assert_eq!(sub.billing_cycle, "monthly");
        assert!(sub.created_at.is_some());
    }

    #[tokio::test]
    async fn missing_credentials_short_circuit() {
        let service = CouchDbService::new(ProviderConfig {
            url: "http://localhost:5984".to_string(),
            food_collection: "foods".to_string(),
            subscription_collection: "subs".to_string(),
            ..Default::default()
        });
        let err = service.delete_food("a1").await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::ConfigurationMissing { ref fields, .. }
                if fields == &vec!["projectId".to_string(), "apiKey".to_string()]
        ));
        assert!(!service.client.is_initialized());
    }

    #[test]
    fn max_retries_defaults_and_overrides() {
        let service = CouchDbService::new(crate::types::ProviderConfig::default());
        assert_eq!(service.max_retries, crate::http_client::MAX_RETRIES);
        assert_eq!(service.max_retries(0).max_retries, 0);
    }
}
