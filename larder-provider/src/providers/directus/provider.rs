//! Directus `BackendService` implementation

use async_trait::async_trait;
use reqwest::Method;

use crate::error::Result;
use crate::traits::{BackendService, ErrorContext, ProviderErrorMapper};
use crate::types::{
    ConfigField, ConfigKey, Food, ProviderKind, ProviderMetadata, RecordKind, Subscription,
};

use super::DirectusService;

#[async_trait]
impl BackendService for DirectusService {
    fn service_name(&self) -> &'static str {
        self.provider_name()
    }

    fn service_kind(&self) -> ProviderKind {
        ProviderKind::Directus
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            kind: ProviderKind::Directus,
            name: "Directus".to_string(),
            description: "Directus collections through the items API".to_string(),
            required_fields: vec![
                ConfigField::text(ConfigKey::Url, "Instance URL", Some("https://cms.example.com")),
                ConfigField::password(ConfigKey::ApiKey, "Static Token"),
                ConfigField::text(ConfigKey::FoodCollection, "Food Collection", Some("foods")),
                ConfigField::text(
                    ConfigKey::SubscriptionCollection,
                    "Subscription Collection",
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
        let url = format!("{}?limit=1", self.items_url(RecordKind::Food));
        match self.request(Method::GET, &url, None, ErrorContext::default()).await {
            Ok(_) => true,
            Err(e) => {
                log::warn!("[directus] Connection test failed: {e}");
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
    use crate::providers::common::{from_native, to_native};
    use crate::providers::directus::fields;
    use crate::types::ProviderConfig;
    use serde_json::json;

    #[test]
    fn items_url_layout() {
        let service = DirectusService::new(ProviderConfig {
            url: "https://cms.example.com//".to_string(),
            food_collection: " pantry ".to_string(),
            ..Default::default()
        });
        assert_eq!(
            service.items_url(RecordKind::Food),
            "https://cms.example.com/items/pantry"
        );
    }

    #[test]
    fn integer_ids_and_decimal_strings() {
        let item = json!({
            "id": 12,
            "food_name": "Flour",
            "price": "3.49",
            "date_created": "2024-02-01T09:30:00.000Z",
            "date_updated": null
        });
        let food: Food =
            from_native("directus", item.as_object().unwrap(), fields(RecordKind::Food)).unwrap();
        assert_eq!(food.id, "12");
        assert!((food.price - 3.49).abs() < f64::EPSILON);
        assert!(food.created_at.is_some());
        assert!(food.updated_at.is_none());
    }

    #[test]
    fn system_dates_not_written() {
        let sub = Subscription {
            name: "Cloud".to_string(),
            updated_at: Some(chrono::Utc::now()),
            ..Default::default()
        };
        let item = to_native("directus", &sub, fields(RecordKind::Subscription)).unwrap();
        assert!(!item.contains_key("date_updated"));
        assert!(!item.contains_key("id"));
    }

    #[test]
    fn max_retries_defaults_and_overrides() {
        let service = DirectusService::new(crate::types::ProviderConfig::default());
        assert_eq!(service.max_retries, crate::http_client::MAX_RETRIES);
        assert_eq!(service.max_retries(0).max_retries, 0);
    }
}
