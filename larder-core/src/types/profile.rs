//! Settings profile types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use larder_provider::{ProviderConfig, ProviderKind};

/// A named, persisted snapshot of provider selection, credentials and identifiers.
///
/// Serialized flat: the connection fields sit beside `profileName` and
/// `providerKind`. Import payloads may omit `id` and the timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsProfile {
    /// Profile ID (UUID), assigned by the store
    #[serde(default)]
    pub id: String,
    /// Display name, unique case-insensitively
    #[serde(default)]
    pub profile_name: String,
    /// Backend kind the profile selects
    #[serde(default)]
    pub provider_kind: ProviderKind,
    /// Connection settings
    #[serde(flatten)]
    pub connection: ProviderConfig,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Created timestamp.
    #[serde(default = "Utc::now", with = "larder_provider::datetime")]
    pub created_at: DateTime<Utc>,
    /// Updated timestamp.
    #[serde(default = "Utc::now", with = "larder_provider::datetime")]
    pub updated_at: DateTime<Utc>,
}

impl SettingsProfile {
    /// A profile not yet stored; the store assigns its id on save.
    pub fn new(
        profile_name: impl Into<String>,
        provider_kind: ProviderKind,
        connection: ProviderConfig,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            profile_name: profile_name.into(),
            provider_kind,
            connection,
            description: description.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the profile has not been stored yet.
    pub fn is_new(&self) -> bool {
        self.id.trim().is_empty()
    }

    /// The active configuration this profile selects.
    pub fn to_active_config(&self) -> super::ActiveConfig {
        super::ActiveConfig {
            provider_kind: self.provider_kind,
            connection: self.connection.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_flat_camel_case() {
        let profile = SettingsProfile::new(
            "Home",
            ProviderKind::Parse,
            ProviderConfig {
                url: "https://parse.example.com".to_string(),
                project_id: "app".to_string(),
                ..Default::default()
            },
            "kitchen",
        );
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["profileName"], "Home");
        assert_eq!(json["providerKind"], "parse");
        assert_eq!(json["url"], "https://parse.example.com");
        assert_eq!(json["projectId"], "app");
        assert!(json["createdAt"].is_string());
        assert!(json.get("connection").is_none());
    }

    #[test]
    fn deserializes_without_id_and_timestamps() {
        let profile: SettingsProfile = serde_json::from_str(
            r#"{"profileName":"Farm","providerKind":"supabase","url":"https://x.supabase.co"}"#,
        )
        .unwrap();
        assert!(profile.is_new());
        assert_eq!(profile.provider_kind, ProviderKind::Supabase);
        assert_eq!(profile.connection.url, "https://x.supabase.co");
        assert_eq!(profile.connection.api_key, "");
    }
}
