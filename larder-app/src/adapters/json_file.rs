//! Whole-file JSON persistence shared by the file adapters

use std::path::{Path, PathBuf};

use larder_core::{CoreError, CoreResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;

/// Files larger than this are refused rather than parsed.
pub const MAX_STORE_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10MB

/// Read and parse `path`; `None` when the file does not exist.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> CoreResult<Option<T>> {
    let metadata = match fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("Store file does not exist: {}", path.display());
            return Ok(None);
        }
        Err(e) => {
            return Err(CoreError::StorageError(format!(
                "Failed to read store file metadata: {e}"
            )));
        }
    };

    if metadata.len() > MAX_STORE_FILE_SIZE {
        return Err(CoreError::StorageError(format!(
            "Store file too large: {} bytes (max: {MAX_STORE_FILE_SIZE} bytes)",
            metadata.len()
        )));
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| CoreError::StorageError(format!("Failed to read store file: {e}")))?;

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| CoreError::SerializationError(format!("Invalid store format: {e}")))
}

/// Sibling file that a save is staged in before it replaces `path`.
fn staging_path(path: &Path) -> PathBuf {
    let mut staged = path.as_os_str().to_owned();
    staged.push(".tmp");
    PathBuf::from(staged)
}

/// Serialize `value` as pretty JSON and replace `path`, creating parent directories.
///
/// The content is written to [`staging_path`] and renamed over `path`, so a
/// crash mid-write leaves the previous file intact.
pub async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to create directory: {e}")))?;
    }

    let content = serde_json::to_string_pretty(value)
        .map_err(|e| CoreError::SerializationError(e.to_string()))?;

    let staged = staging_path(path);
    fs::write(&staged, content)
        .await
        .map_err(|e| CoreError::StorageError(format!("Failed to write store file: {e}")))?;

    if let Err(e) = fs::rename(&staged, path).await {
        let _ = fs::remove_file(&staged).await;
        return Err(CoreError::StorageError(format!(
            "Failed to replace store file: {e}"
        )));
    }
    Ok(())
}
