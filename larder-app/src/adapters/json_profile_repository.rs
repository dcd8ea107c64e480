//! Profile repository backed by one JSON file

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use larder_core::CoreResult;
use larder_core::traits::ProfileRepository;
use larder_core::types::SettingsProfile;

use super::json_file::{read_json, write_json};

const STORE_FILE_NAME: &str = "profiles.json";

/// Stores every profile as one pretty-printed JSON array.
///
/// A missing file reads as no profiles. Each save overwrites the whole file.
pub struct JsonProfileRepository {
    path: PathBuf,
}

impl JsonProfileRepository {
    /// Repository over `profiles.json` inside `data_dir`
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self::at_path(data_dir.join(STORE_FILE_NAME))
    }

    /// Repository over an explicit file path
    #[must_use]
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProfileRepository for JsonProfileRepository {
    async fn load_all(&self) -> CoreResult<Vec<SettingsProfile>> {
        Ok(read_json(&self.path).await?.unwrap_or_default())
    }

    async fn save_all(&self, profiles: &[SettingsProfile]) -> CoreResult<()> {
        write_json(&self.path, profiles).await?;
        log::debug!(
            "Wrote {} profiles to {}",
            profiles.len(),
            self.path.display()
        );
        Ok(())
    }
}
