//! Active configuration backed by a JSON file, with environment overrides

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use larder_core::CoreResult;
use larder_core::traits::ConfigStore;
use larder_core::types::{ActiveConfig, ProviderKind};

use super::json_file::{read_json, write_json};

const STORE_FILE_NAME: &str = "config.json";

/// Environment variable selecting the provider kind.
pub const ENV_PROVIDER: &str = "LARDER_PROVIDER";
/// Environment variable overriding the endpoint URL.
pub const ENV_URL: &str = "LARDER_URL";
/// Environment variable overriding the project id.
pub const ENV_PROJECT_ID: &str = "LARDER_PROJECT_ID";
/// Environment variable overriding the API key.
pub const ENV_API_KEY: &str = "LARDER_API_KEY";

/// `ConfigStore` over `config.json`.
///
/// On load, non-empty `LARDER_*` environment variables take precedence over
/// the file, which takes precedence over defaults. Saving writes only what
/// the caller passed; overrides are never persisted by themselves.
pub struct JsonConfigStore {
    path: PathBuf,
    env_overrides: bool,
}

impl JsonConfigStore {
    /// Store over `config.json` inside `data_dir`
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(STORE_FILE_NAME),
            env_overrides: true,
        }
    }

    /// Ignore the process environment on load
    #[must_use]
    pub fn without_env_overrides(mut self) -> Self {
        self.env_overrides = false;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Apply `LARDER_*` overrides from `lookup` onto `config`.
///
/// Blank values are ignored, as is an unrecognized provider name.
pub fn apply_overrides(
    mut config: ActiveConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> ActiveConfig {
    let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(name) = value(ENV_PROVIDER) {
        match name.parse::<ProviderKind>() {
            Ok(kind) => config.provider_kind = kind,
            Err(e) => log::warn!("Ignoring {ENV_PROVIDER}: {e}"),
        }
    }
    if let Some(url) = value(ENV_URL) {
        config.connection.url = url;
    }
    if let Some(project_id) = value(ENV_PROJECT_ID) {
        config.connection.project_id = project_id;
    }
    if let Some(api_key) = value(ENV_API_KEY) {
        config.connection.api_key = api_key;
    }
    config
}

#[async_trait]
impl ConfigStore for JsonConfigStore {
    async fn load(&self) -> CoreResult<ActiveConfig> {
        let config: ActiveConfig = read_json(&self.path).await?.unwrap_or_default();
        if self.env_overrides {
            Ok(apply_overrides(config, |key| std::env::var(key).ok()))
        } else {
            Ok(config)
        }
    }

    async fn save(&self, config: &ActiveConfig) -> CoreResult<()> {
        write_json(&self.path, config).await?;
        log::info!(
            "Saved active configuration ({}) to {}",
            config.provider_kind,
            self.path.display()
        );
        Ok(())
    }
}
