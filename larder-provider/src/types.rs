use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

// ============ Provider Types ============

/// Identifies which backend implementation to use.
///
/// The set is closed: the factory dispatches over exactly these variants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Appwrite Databases (document database).
    #[default]
    Appwrite,
    /// Apache `CouchDB` (document database).
    CouchDb,
    /// Firebase Realtime Database.
    Firebase,
    /// Directus (headless CMS).
    Directus,
    /// Parse-compatible REST backend.
    Parse,
    /// Supabase (`PostgreSQL` via `PostgREST`).
    Supabase,
}

impl ProviderKind {
    /// Every supported kind, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Appwrite,
        Self::CouchDb,
        Self::Firebase,
        Self::Directus,
        Self::Parse,
        Self::Supabase,
    ];

    /// Stable lowercase identifier, identical to the serialized form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Appwrite => "appwrite",
            Self::CouchDb => "couchdb",
            Self::Firebase => "firebase",
            Self::Directus => "directus",
            Self::Parse => "parse",
            Self::Supabase => "supabase",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ProviderError::UnsupportedKind {
                kind: s.to_string(),
            })
    }
}

/// The two record collections every backend serves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Food items.
    Food,
    /// Recurring subscriptions.
    Subscription,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Food => write!(f, "food"),
            Self::Subscription => write!(f, "subscription"),
        }
    }
}

// ============ Configuration Types ============

/// Connection settings shared by every provider.
///
/// Each provider uses a subset; see [`ProviderMetadata::required_fields`].
/// Blank strings mean "not configured".
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// Endpoint / base URL of the backend.
    pub url: String,
    /// Project, tenant or application identifier.
    pub project_id: String,
    /// API key, token or secret.
    pub api_key: String,
    /// Database identifier (Appwrite).
    pub database_id: String,
    /// Collection / table / class holding food records.
    pub food_collection: String,
    /// Collection / table / class holding subscription records.
    pub subscription_collection: String,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("url", &self.url)
            .field("project_id", &self.project_id)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("database_id", &self.database_id)
            .field("food_collection", &self.food_collection)
            .field("subscription_collection", &self.subscription_collection)
            .finish()
    }
}

impl ProviderConfig {
    /// Value of a single configuration field.
    pub fn value(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::Url => &self.url,
            ConfigKey::ProjectId => &self.project_id,
            ConfigKey::ApiKey => &self.api_key,
            ConfigKey::DatabaseId => &self.database_id,
            ConfigKey::FoodCollection => &self.food_collection,
            ConfigKey::SubscriptionCollection => &self.subscription_collection,
        }
    }

    /// Keys of the required fields that are blank, in the order given.
    pub fn missing_fields(&self, required: &[ConfigKey]) -> Vec<String> {
        required
            .iter()
            .filter(|key| self.value(**key).trim().is_empty())
            .map(|key| key.as_str().to_string())
            .collect()
    }

    /// Collection name configured for a record kind.
    pub fn collection(&self, kind: RecordKind) -> &str {
        match kind {
            RecordKind::Food => self.food_collection.trim(),
            RecordKind::Subscription => self.subscription_collection.trim(),
        }
    }

    /// Base URL without trailing slashes.
    pub fn base_url(&self) -> &str {
        self.url.trim().trim_end_matches('/')
    }
}

/// Machine-readable configuration field keys.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ConfigKey {
    Url,
    ProjectId,
    ApiKey,
    DatabaseId,
    FoodCollection,
    SubscriptionCollection,
}

impl ConfigKey {
    /// Serialized key, matching the [`ProviderConfig`] JSON field name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::ProjectId => "projectId",
            Self::ApiKey => "apiKey",
            Self::DatabaseId => "databaseId",
            Self::FoodCollection => "foodCollection",
            Self::SubscriptionCollection => "subscriptionCollection",
        }
    }
}

/// Input type of a configuration field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain text input.
    Text,
    /// Masked/password input.
    Password,
}

/// Definition of a single configuration field required by a provider.
///
/// Used to dynamically build configuration forms in UIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigField {
    /// Which configuration value this field edits.
    pub key: ConfigKey,
    /// Human-readable label (e.g., `"API Key"`).
    pub label: String,
    /// Input type for UI rendering.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Optional placeholder text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Optional help/description text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

impl ConfigField {
    pub(crate) fn text(key: ConfigKey, label: &str, placeholder: Option<&str>) -> Self {
        Self {
            key,
            label: label.to_string(),
            field_type: FieldType::Text,
            placeholder: placeholder.map(str::to_string),
            help_text: None,
        }
    }

    pub(crate) fn password(key: ConfigKey, label: &str) -> Self {
        Self {
            key,
            label: label.to_string(),
            field_type: FieldType::Password,
            placeholder: None,
            help_text: None,
        }
    }

    #[must_use]
    pub(crate) fn with_help(mut self, help: &str) -> Self {
        self.help_text = Some(help.to_string());
        self
    }
}

/// Static description of a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMetadata {
    /// Provider kind identifier.
    pub kind: ProviderKind,
    /// Human-readable provider name.
    pub name: String,
    /// Short description of the provider.
    pub description: String,
    /// Configuration fields that must be non-blank.
    pub required_fields: Vec<ConfigField>,
}

impl ProviderMetadata {
    /// Keys of the required fields.
    pub fn required_keys(&self) -> Vec<ConfigKey> {
        self.required_fields.iter().map(|f| f.key).collect()
    }
}

// ============ Record Types ============

/// Common behaviour of the canonical record types.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Which collection the record lives in.
    const KIND: RecordKind;

    /// Opaque identifier; empty before the record is persisted.
    fn id(&self) -> &str;

    /// Replace the identifier.
    fn set_id(&mut self, id: String);

    /// The record's display name, required to be non-blank.
    fn name(&self) -> &str;

    /// Creation timestamp, if stamped.
    fn created_at(&self) -> Option<DateTime<Utc>>;

    /// Last update timestamp, if stamped.
    fn updated_at(&self) -> Option<DateTime<Utc>>;

    /// Set the creation timestamp.
    fn set_created_at(&mut self, at: DateTime<Utc>);

    /// Set the last update timestamp.
    fn set_updated_at(&mut self, at: DateTime<Utc>);
}

/// A food item in the pantry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Food {
    /// Record ID, assigned by the provider on create.
    #[serde(with = "crate::utils::lenient::string")]
    pub id: String,
    /// Name of the food item.
    pub food_name: String,
    /// Free-form category (e.g. "dairy").
    pub category: String,
    /// Quantity on hand.
    #[serde(with = "crate::utils::lenient::number")]
    pub quantity: f64,
    /// Purchase date (ISO-8601 date).
    pub purchase_date: String,
    /// Expiry date (ISO-8601 date).
    pub expiry_date: String,
    /// Purchase price.
    #[serde(with = "crate::utils::lenient::number")]
    pub price: f64,
    /// Free-text notes.
    pub notes: String,
    /// Created timestamp.
    #[serde(with = "crate::utils::datetime::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Updated timestamp.
    #[serde(with = "crate::utils::datetime::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A recurring paid subscription.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Subscription {
    /// Record ID, assigned by the provider on create.
    #[serde(with = "crate::utils::lenient::string")]
    pub id: String,
    /// Name of the subscription.
    pub name: String,
    /// Price per billing cycle.
    #[serde(with = "crate::utils::lenient::number")]
    pub price: f64,
    /// Billing cycle (e.g. "monthly", "yearly").
    pub billing_cycle: String,
    /// Start date (ISO-8601 date).
    pub start_date: String,
    /// Next payment date (ISO-8601 date).
    pub next_payment_date: String,
    /// Free-form category.
    pub category: String,
    /// Free-text notes.
    pub notes: String,
    /// Created timestamp.
    #[serde(with = "crate::utils::datetime::option")]
    pub created_at: Option<DateTime<Utc>>,
    /// Updated timestamp.
    #[serde(with = "crate::utils::datetime::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

macro_rules! impl_record {
    ($ty:ty, $kind:expr, $name:ident) => {
        impl Record for $ty {
            const KIND: RecordKind = $kind;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }

            fn name(&self) -> &str {
                &self.$name
            }

            fn created_at(&self) -> Option<DateTime<Utc>> {
                self.created_at
            }

            fn updated_at(&self) -> Option<DateTime<Utc>> {
                self.updated_at
            }

            fn set_created_at(&mut self, at: DateTime<Utc>) {
                self.created_at = Some(at);
            }

            fn set_updated_at(&mut self, at: DateTime<Utc>) {
                self.updated_at = Some(at);
            }
        }
    };
}

impl_record!(Food, RecordKind::Food, food_name);
impl_record!(Subscription, RecordKind::Subscription, name);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_kind_parses_case_insensitively() {
        assert_eq!("Supabase".parse::<ProviderKind>().ok(), Some(ProviderKind::Supabase));
        assert_eq!(" couchdb ".parse::<ProviderKind>().ok(), Some(ProviderKind::CouchDb));
    }

    #[test]
    fn provider_kind_rejects_unknown_name() {
        let err = "dynamodb".parse::<ProviderKind>().unwrap_err();
        assert!(matches!(err, ProviderError::UnsupportedKind { ref kind } if kind == "dynamodb"));
    }

    #[test]
    fn provider_kind_serializes_like_display() {
        for kind in ProviderKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }

    #[test]
    fn missing_fields_reports_blank_values() {
        let config = ProviderConfig {
            url: "https://example.com".to_string(),
            api_key: "   ".to_string(),
            ..Default::default()
        };
        let missing = config.missing_fields(&[ConfigKey::Url, ConfigKey::ApiKey, ConfigKey::ProjectId]);
        assert_eq!(missing, vec!["apiKey".to_string(), "projectId".to_string()]);
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = ProviderConfig {
            api_key: "super-secret".to_string(),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn food_defaults_missing_fields() {
        let food: Food = serde_json::from_str(r#"{"foodName":"Milk"}"#).unwrap();
        assert_eq!(food.food_name, "Milk");
        assert_eq!(food.id, "");
        assert_eq!(food.notes, "");
        assert!(food.created_at.is_none());
    }

    #[test]
    fn subscription_accepts_numeric_strings() {
        let sub: Subscription =
            serde_json::from_str(r#"{"id":17,"name":"Music","price":"9.99"}"#).unwrap();
        assert_eq!(sub.id, "17");
        assert!((sub.price - 9.99).abs() < f64::EPSILON);
    }
}
