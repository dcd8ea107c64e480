//! Default on-disk locations

use std::path::PathBuf;

const APP_DIR_NAME: &str = "larder";

/// Directory holding `profiles.json` and `config.json`.
///
/// The platform config directory joined with `larder`, or the current
/// directory when the platform has none.
pub fn default_data_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}
