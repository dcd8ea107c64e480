#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for the JSON-file adapters.

use larder_app::adapters::{JsonConfigStore, JsonProfileRepository, MAX_STORE_FILE_SIZE};
use larder_core::error::CoreError;
use larder_core::traits::{ConfigStore, ProfileRepository};
use larder_core::types::{ActiveConfig, ProviderKind, SettingsProfile};

fn profile(name: &str) -> SettingsProfile {
    let mut p = SettingsProfile::new(name, ProviderKind::CouchDb, Default::default(), "test");
    p.id = format!("id-{name}");
    p
}

#[tokio::test]
async fn missing_profile_file_reads_as_empty() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let repo = JsonProfileRepository::new(tmp.path());
    assert!(repo.load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn save_creates_directory_and_round_trips() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let dir = tmp.path().join("nested").join("larder");
    let repo = JsonProfileRepository::new(&dir);

    let profiles = vec![profile("A"), profile("B")];
    repo.save_all(&profiles).await.unwrap();

    assert!(dir.join("profiles.json").exists());
    assert_eq!(repo.load_all().await.unwrap(), profiles);
}

#[tokio::test]
async fn save_overwrites_whole_file() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let repo = JsonProfileRepository::new(tmp.path());

    repo.save_all(&[profile("A"), profile("B")]).await.unwrap();
    repo.save_all(&[profile("C")]).await.unwrap();

    let loaded = repo.load_all().await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].profile_name, "C");
}

#[tokio::test]
async fn save_replaces_file_without_leaving_staging_copy() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let repo = JsonProfileRepository::new(tmp.path());
    let staged = tmp.path().join("profiles.json.tmp");

    // Leftover from a save that died before the rename.
    std::fs::write(&staged, "{ partial").unwrap();

    repo.save_all(&[profile("A")]).await.unwrap();
    repo.save_all(&[profile("B")]).await.unwrap();

    assert!(!staged.exists());
    let loaded = repo.load_all().await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].profile_name, "B");
}

#[tokio::test]
async fn profile_file_uses_camel_case_keys() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let repo = JsonProfileRepository::new(tmp.path());
    repo.save_all(&[profile("A")]).await.unwrap();

    let raw = std::fs::read_to_string(repo.path()).unwrap();
    for key in ["\"profileName\"", "\"providerKind\"", "\"foodCollection\"", "\"createdAt\""] {
        assert!(raw.contains(key), "missing {key} in {raw}");
    }
    // Pretty-printed
    assert!(raw.contains('\n'));
}

#[tokio::test]
async fn corrupt_profile_file_is_serialization_error() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let repo = JsonProfileRepository::new(tmp.path());
    std::fs::write(repo.path(), "{ not json").unwrap();

    let err = repo.load_all().await.unwrap_err();
    assert!(matches!(err, CoreError::SerializationError(_)));
}

#[tokio::test]
async fn oversized_profile_file_is_refused() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let repo = JsonProfileRepository::new(tmp.path());
    let file = std::fs::File::create(repo.path()).unwrap();
    file.set_len(MAX_STORE_FILE_SIZE + 1).unwrap();

    let err = repo.load_all().await.unwrap_err();
    assert!(matches!(err, CoreError::StorageError(msg) if msg.contains("too large")));
}

#[tokio::test]
async fn missing_config_file_yields_default() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let store = JsonConfigStore::new(tmp.path()).without_env_overrides();
    assert_eq!(store.load().await.unwrap(), ActiveConfig::default());
}

#[tokio::test]
async fn config_round_trips() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let store = JsonConfigStore::new(tmp.path()).without_env_overrides();

    let mut config = ActiveConfig {
        provider_kind: ProviderKind::Parse,
        ..Default::default()
    };
    config.connection.url = "https://parse.example.com/parse".to_string();
    config.connection.project_id = "app-id".to_string();
    store.save(&config).await.unwrap();

    assert_eq!(store.load().await.unwrap(), config);
    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("\"providerKind\": \"parse\""));
}
