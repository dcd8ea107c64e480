//! Settings profile store
//!
//! Keeps the profile list in memory behind one mutex. The list is loaded from
//! the [`ProfileRepository`](crate::traits::ProfileRepository) on first access;
//! every mutation persists the complete new list before it replaces the
//! in-memory copy.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};

use crate::error::{BatchFailure, CoreError, CoreResult, ValidationFailure};
use crate::services::ServiceContext;
use crate::types::{ActiveConfig, ExportSelection, SettingsProfile};

/// Maximum number of stored profiles
pub const MAX_PROFILES: usize = 100;

/// Maximum profile name length, in characters
pub const MAX_PROFILE_NAME_LEN: usize = 100;

/// Named settings profiles, persisted as a whole set
pub struct ProfileStore {
    ctx: Arc<ServiceContext>,
    profiles: Mutex<Option<Vec<SettingsProfile>>>,
}

impl ProfileStore {
    /// Create a store; nothing is read until the first call
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            profiles: Mutex::new(None),
        }
    }

    async fn state(&self) -> CoreResult<MappedMutexGuard<'_, Vec<SettingsProfile>>> {
        let mut guard = self.profiles.lock().await;
        if guard.is_none() {
            let loaded = self.ctx.profile_repository.load_all().await?;
            log::info!("Loaded {} settings profiles", loaded.len());
            *guard = Some(loaded);
        }
        Ok(MutexGuard::map(guard, |profiles| {
            profiles.get_or_insert_with(Vec::new)
        }))
    }

    // ===== Queries =====

    /// All profiles, sorted by name
    pub async fn list_all(&self) -> CoreResult<Vec<SettingsProfile>> {
        let mut profiles = self.state().await?.clone();
        profiles.sort_by(|a, b| a.profile_name.cmp(&b.profile_name));
        Ok(profiles)
    }

    pub async fn get_by_id(&self, id: &str) -> CoreResult<Option<SettingsProfile>> {
        Ok(self.state().await?.iter().find(|p| p.id == id).cloned())
    }

    /// Look a profile up by name, ignoring case
    pub async fn get_by_name(&self, name: &str) -> CoreResult<Option<SettingsProfile>> {
        let name = name.trim();
        Ok(self
            .state()
            .await?
            .iter()
            .find(|p| same_name(&p.profile_name, name))
            .cloned())
    }

    pub async fn count(&self) -> CoreResult<usize> {
        Ok(self.state().await?.len())
    }

    /// Whether another profile can be added
    pub async fn has_capacity(&self) -> CoreResult<bool> {
        Ok(self.count().await? < MAX_PROFILES)
    }

    // ===== Mutations =====

    /// Insert or replace a profile and persist the set
    ///
    /// A profile whose id is not stored yet gets a fresh UUID. Returns the
    /// profile as stored.
    pub async fn save(&self, mut profile: SettingsProfile) -> CoreResult<SettingsProfile> {
        let name = validate_name(&profile.profile_name)?;

        let mut profiles = self.state().await?;

        if profiles
            .iter()
            .any(|p| p.id != profile.id && same_name(&p.profile_name, &name))
        {
            return Err(CoreError::DuplicateName(name));
        }

        let existing = profiles
            .iter()
            .position(|p| !profile.is_new() && p.id == profile.id);

        if existing.is_none() && profiles.len() >= MAX_PROFILES {
            return Err(CoreError::ProfileLimitExceeded {
                limit: MAX_PROFILES,
            });
        }

        let now = Utc::now();
        profile.profile_name = name;
        profile.updated_at = now;

        let mut next = profiles.clone();
        match existing {
            Some(index) => {
                profile.created_at = next[index].created_at;
                next[index] = profile.clone();
            }
            None => {
                profile.id = uuid::Uuid::new_v4().to_string();
                profile.created_at = now;
                next.push(profile.clone());
            }
        }

        self.ctx.profile_repository.save_all(&next).await?;
        *profiles = next;

        log::info!("Saved profile '{}' ({})", profile.profile_name, profile.id);
        Ok(profile)
    }

    /// Remove a profile and persist the set
    pub async fn delete(&self, id: &str) -> CoreResult<()> {
        let mut profiles = self.state().await?;

        let index = profiles
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        let mut next = profiles.clone();
        let removed = next.remove(index);

        self.ctx.profile_repository.save_all(&next).await?;
        *profiles = next;

        log::info!("Deleted profile '{}' ({id})", removed.profile_name);
        Ok(())
    }

    /// Snapshot the active configuration into a new profile
    pub async fn create_from_current_config(
        &self,
        name: &str,
        description: &str,
    ) -> CoreResult<SettingsProfile> {
        let config = self.ctx.current_config().await?;
        self.save(SettingsProfile::new(
            name,
            config.provider_kind,
            config.connection,
            description,
        ))
        .await
    }

    /// Apply a stored profile onto the active configuration and persist it
    pub async fn load_into_current_config(&self, id: &str) -> CoreResult<ActiveConfig> {
        let profile = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        let config = profile.to_active_config();
        self.ctx.config_store.save(&config).await?;

        log::info!(
            "Loaded profile '{}' into the active configuration ({})",
            profile.profile_name,
            config.provider_kind
        );
        Ok(config)
    }

    // ===== Import / Export =====

    /// Import a JSON array of profiles
    ///
    /// Every accepted profile gets a fresh id and timestamps; clashing names
    /// are suffixed with ` (1)`, ` (2)`, ... Accepted profiles are persisted
    /// even when others fail, in which case the error reports both counts.
    pub async fn import_batch(&self, serialized: &str) -> CoreResult<Vec<SettingsProfile>> {
        let incoming: Vec<SettingsProfile> = serde_json::from_str(serialized)
            .map_err(|e| CoreError::InvalidFormat(e.to_string()))?;

        let mut profiles = self.state().await?;
        let mut next = profiles.clone();
        let mut imported = Vec::new();
        let mut failures = Vec::new();

        for (index, mut profile) in incoming.into_iter().enumerate() {
            let label = if profile.profile_name.trim().is_empty() {
                format!("#{}", index + 1)
            } else {
                profile.profile_name.trim().to_string()
            };

            if next.len() >= MAX_PROFILES {
                failures.push(BatchFailure {
                    item: label,
                    reason: format!("profile limit of {MAX_PROFILES} reached"),
                });
                continue;
            }

            let name = match validate_name(&profile.profile_name) {
                Ok(name) => name,
                Err(e) => {
                    failures.push(BatchFailure {
                        item: label,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let now = Utc::now();
            profile.id = uuid::Uuid::new_v4().to_string();
            profile.profile_name = unique_name(&next, &name);
            profile.created_at = now;
            profile.updated_at = now;

            next.push(profile.clone());
            imported.push(profile);
        }

        if !imported.is_empty() {
            self.ctx.profile_repository.save_all(&next).await?;
            *profiles = next;
            log::info!("Imported {} settings profiles", imported.len());
        }

        if failures.is_empty() {
            return Ok(imported);
        }

        log::warn!(
            "Profile import: {} imported, {} rejected",
            imported.len(),
            failures.len()
        );
        Err(CoreError::PartialBatchFailure {
            succeeded: imported.len(),
            failed: failures.len(),
            failures,
        })
    }

    /// Serialize the selected profiles as a pretty JSON array
    pub async fn export_selected(&self, selection: ExportSelection) -> CoreResult<String> {
        let profiles = self.state().await?;
        let selected: Vec<&SettingsProfile> = profiles
            .iter()
            .filter(|p| selection.includes(&p.id))
            .collect();

        serde_json::to_string_pretty(&selected)
            .map_err(|e| CoreError::SerializationError(e.to_string()))
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

fn validate_name(name: &str) -> CoreResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(
            ValidationFailure::InvalidProfileName("name must not be blank".to_string()).into(),
        );
    }
    if name.chars().count() > MAX_PROFILE_NAME_LEN {
        return Err(ValidationFailure::InvalidProfileName(format!(
            "name exceeds {MAX_PROFILE_NAME_LEN} characters"
        ))
        .into());
    }
    Ok(name.to_string())
}

fn unique_name(profiles: &[SettingsProfile], base: &str) -> String {
    let taken = |candidate: &str| profiles.iter().any(|p| same_name(&p.profile_name, candidate));
    if !taken(base) {
        return base.to_string();
    }
    let mut n = 1;
    loop {
        // The suffix must not push the name past the length limit.
        let suffix = format!(" ({n})");
        let keep = MAX_PROFILE_NAME_LEN.saturating_sub(suffix.chars().count());
        let stem: String = base.chars().take(keep).collect();
        let candidate = format!("{}{suffix}", stem.trim_end());
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_profile_store, test_profile};
    use crate::traits::ConfigStore;
    use larder_provider::{ProviderConfig, ProviderKind};
    use std::time::Duration;

    #[tokio::test]
    async fn save_assigns_id_and_timestamps() {
        let (store, repo, _) = create_test_profile_store();

        let saved = store.save(test_profile("Home")).await.unwrap();
        assert!(!saved.id.is_empty());
        assert_eq!(saved.created_at, saved.updated_at);
        assert_eq!(repo.saved_profiles().await.len(), 1);
        assert_eq!(repo.save_count().await, 1);
    }

    #[tokio::test]
    async fn save_replaces_existing_keeping_created_at() {
        let (store, _, _) = create_test_profile_store();
        let saved = store.save(test_profile("Home")).await.unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;

        let mut edited = saved.clone();
        edited.description = "second".to_string();
        edited.created_at = Utc::now();
        let updated = store.save(edited).await.unwrap();

        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.created_at, saved.created_at);
        assert!(updated.updated_at > saved.updated_at);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn save_rejects_duplicate_name_ignoring_case() {
        let (store, _, _) = create_test_profile_store();
        store.save(test_profile("Shop A")).await.unwrap();

        let err = store.save(test_profile("shop a")).await.unwrap_err();
        assert!(matches!(err, CoreError::DuplicateName(_)));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn save_allows_renaming_to_own_name() {
        let (store, _, _) = create_test_profile_store();
        let mut saved = store.save(test_profile("Shop A")).await.unwrap();
        saved.profile_name = "SHOP A".to_string();
        let renamed = store.save(saved).await.unwrap();
        assert_eq!(renamed.profile_name, "SHOP A");
    }

    #[tokio::test]
    async fn save_validates_name() {
        let (store, _, _) = create_test_profile_store();
        let err = store.save(test_profile("   ")).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::ValidationFailed(ValidationFailure::InvalidProfileName(_))
        ));

        let long = "x".repeat(MAX_PROFILE_NAME_LEN + 1);
        let err = store.save(test_profile(&long)).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::ValidationFailed(ValidationFailure::InvalidProfileName(_))
        ));

        let exact = "y".repeat(MAX_PROFILE_NAME_LEN);
        assert!(store.save(test_profile(&exact)).await.is_ok());
    }

    #[tokio::test]
    async fn save_enforces_profile_limit() {
        let (store, _, _) = create_test_profile_store();
        for i in 0..MAX_PROFILES {
            store.save(test_profile(&format!("P{i}"))).await.unwrap();
        }
        assert!(!store.has_capacity().await.unwrap());

        let err = store.save(test_profile("One too many")).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::ProfileLimitExceeded { limit: MAX_PROFILES }
        ));

        // Updates still work at the limit
        let mut first = store.get_by_name("P0").await.unwrap().unwrap();
        first.description = "edited".to_string();
        assert!(store.save(first).await.is_ok());
    }

    #[tokio::test]
    async fn failed_persist_leaves_memory_unchanged() {
        let (store, repo, _) = create_test_profile_store();
        let kept = store.save(test_profile("Kept")).await.unwrap();

        repo.set_save_error(Some("disk full".to_string())).await;
        let err = store.save(test_profile("Lost")).await.unwrap_err();
        assert!(matches!(err, CoreError::StorageError(_)));
        assert!(store.delete(&kept.id).await.is_err());

        repo.set_save_error(None).await;
        let names: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.profile_name)
            .collect();
        assert_eq!(names, vec!["Kept".to_string()]);
    }

    #[tokio::test]
    async fn loads_repository_once() {
        let (store, repo, _) = create_test_profile_store();
        repo.seed(vec![test_profile("Seeded")]).await;

        assert_eq!(store.count().await.unwrap(), 1);
        store.save(test_profile("Second")).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
        assert_eq!(repo.load_count().await, 1);
    }

    #[tokio::test]
    async fn list_all_sorts_by_name() {
        let (store, _, _) = create_test_profile_store();
        for name in ["beta", "Alpha", "alpha2"] {
            store.save(test_profile(name)).await.unwrap();
        }
        let names: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.profile_name)
            .collect();
        assert_eq!(names, vec!["Alpha", "alpha2", "beta"]);
    }

    #[tokio::test]
    async fn lookups_return_none_when_absent() {
        let (store, _, _) = create_test_profile_store();
        let saved = store.save(test_profile("Cellar")).await.unwrap();

        assert_eq!(store.get_by_id(&saved.id).await.unwrap(), Some(saved.clone()));
        assert_eq!(store.get_by_name("CELLAR").await.unwrap(), Some(saved));
        assert!(store.get_by_id("nope").await.unwrap().is_none());
        assert!(store.get_by_name("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_missing_profile_is_not_found() {
        let (store, _, _) = create_test_profile_store();
        let err = store.delete("missing").await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn delete_removes_and_persists() {
        let (store, repo, _) = create_test_profile_store();
        let saved = store.save(test_profile("Gone")).await.unwrap();
        store.delete(&saved.id).await.unwrap();
        assert!(repo.saved_profiles().await.is_empty());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn create_from_current_config_snapshots_connection() {
        let (store, _, config_store) = create_test_profile_store();
        config_store
            .save(&ActiveConfig {
                provider_kind: ProviderKind::CouchDb,
                connection: ProviderConfig {
                    url: "http://localhost:5984".to_string(),
                    project_id: "admin".to_string(),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        let profile = store
            .create_from_current_config("Local couch", "dev box")
            .await
            .unwrap();
        assert_eq!(profile.provider_kind, ProviderKind::CouchDb);
        assert_eq!(profile.connection.url, "http://localhost:5984");
        assert_eq!(profile.description, "dev box");
    }

    #[tokio::test]
    async fn load_into_current_config_applies_profile() {
        let (store, _, config_store) = create_test_profile_store();
        let mut profile = test_profile("Remote");
        profile.provider_kind = ProviderKind::Firebase;
        profile.connection.url = "https://demo.firebaseio.com".to_string();
        let saved = store.save(profile).await.unwrap();

        let applied = store.load_into_current_config(&saved.id).await.unwrap();
        assert_eq!(applied.provider_kind, ProviderKind::Firebase);
        assert_eq!(config_store.load().await.unwrap(), applied);

        let err = store.load_into_current_config("missing").await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn import_renames_clashing_names() {
        let (store, _, _) = create_test_profile_store();
        let payload = r#"[
            {"profileName": "Farm", "providerKind": "parse"},
            {"profileName": "Farm", "providerKind": "parse"}
        ]"#;

        let imported = store.import_batch(payload).await.unwrap();
        let names: Vec<&str> = imported.iter().map(|p| p.profile_name.as_str()).collect();
        assert_eq!(names, vec!["Farm", "Farm (1)"]);
        assert_ne!(imported[0].id, imported[1].id);
    }

    #[tokio::test]
    async fn import_rename_stays_within_name_limit() {
        let (store, _, _) = create_test_profile_store();
        let long = "n".repeat(MAX_PROFILE_NAME_LEN);
        store.save(test_profile(&long)).await.unwrap();

        let payload = serde_json::json!([{ "profileName": long }]).to_string();
        let imported = store.import_batch(&payload).await.unwrap();
        let renamed = &imported[0].profile_name;
        assert_eq!(renamed.chars().count(), MAX_PROFILE_NAME_LEN);
        assert!(renamed.ends_with(" (1)"));
        assert_ne!(renamed, &long);

        let mut edited = imported[0].clone();
        edited.description = "edited".to_string();
        assert!(store.save(edited).await.is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_saves_and_import_all_persist() {
        const WRITERS: usize = 40;
        let (store, repo, _) = create_test_profile_store();
        let store = Arc::new(store);

        let mut handles = Vec::new();
        for i in 0..WRITERS {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.save(test_profile(&format!("Writer {i}"))).await.map(|_| ())
            }));
        }
        let importer = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            importer
                .import_batch(r#"[{"profileName": "Imported"}]"#)
                .await
                .map(|_| ())
        }));

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.count().await.unwrap(), WRITERS + 1);
        let persisted = repo.saved_profiles().await;
        assert_eq!(persisted.len(), WRITERS + 1);
        assert!(persisted.iter().any(|p| p.profile_name == "Imported"));
        for i in 0..WRITERS {
            let name = format!("Writer {i}");
            assert!(persisted.iter().any(|p| p.profile_name == name));
        }
    }

    #[tokio::test]
    async fn import_rejects_malformed_payload() {
        let (store, repo, _) = create_test_profile_store();
        let err = store.import_batch("{not json").await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidFormat(_)));
        assert_eq!(repo.save_count().await, 0);
    }

    #[tokio::test]
    async fn import_reports_blank_names_but_keeps_the_rest() {
        let (store, _, _) = create_test_profile_store();
        let payload = r#"[{"profileName": "Good"}, {"profileName": "  "}]"#;

        let err = store.import_batch(payload).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::PartialBatchFailure {
                succeeded: 1,
                failed: 1,
                ..
            }
        ));
        assert!(store.get_by_name("Good").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn import_stops_accepting_at_limit() {
        let (store, _, _) = create_test_profile_store();
        for i in 0..MAX_PROFILES - 1 {
            store.save(test_profile(&format!("P{i}"))).await.unwrap();
        }

        let payload = r#"[{"profileName": "Last"}, {"profileName": "Overflow"}]"#;
        let err = store.import_batch(payload).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::PartialBatchFailure {
                succeeded: 1,
                failed: 1,
                ..
            }
        ));
        assert_eq!(store.count().await.unwrap(), MAX_PROFILES);
    }

    #[tokio::test]
    async fn export_then_import_preserves_fields() {
        let (source, _, _) = create_test_profile_store();
        let mut profile = test_profile("Pantry");
        profile.provider_kind = ProviderKind::Supabase;
        profile.connection.api_key = "anon-key".to_string();
        profile.connection.food_collection = "foods".to_string();
        let original = source.save(profile).await.unwrap();

        let exported = source.export_selected(ExportSelection::All).await.unwrap();

        let (target, _, _) = create_test_profile_store();
        let imported = target.import_batch(&exported).await.unwrap();
        assert_eq!(imported.len(), 1);

        let copy = &imported[0];
        assert_ne!(copy.id, original.id);
        assert_eq!(copy.profile_name, original.profile_name);
        assert_eq!(copy.provider_kind, original.provider_kind);
        assert_eq!(copy.connection, original.connection);
        assert_eq!(copy.description, original.description);
    }

    #[tokio::test]
    async fn export_selected_skips_unknown_ids() {
        let (store, _, _) = create_test_profile_store();
        let a = store.save(test_profile("A")).await.unwrap();
        store.save(test_profile("B")).await.unwrap();

        let json = store
            .export_selected(ExportSelection::Ids(vec![a.id.clone(), "ghost".to_string()]))
            .await
            .unwrap();
        let parsed: Vec<SettingsProfile> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, a.id);
    }
}
