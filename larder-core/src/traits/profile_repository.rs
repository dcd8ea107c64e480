//! Profile persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::SettingsProfile;

/// Whole-set persistence for settings profiles.
///
/// The store always writes the complete list; implementations overwrite
/// whatever they held before.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Load every stored profile. A store that was never written is empty.
    async fn load_all(&self) -> CoreResult<Vec<SettingsProfile>>;

    /// Replace the stored set with `profiles`.
    ///
    /// # Arguments
    /// * `profiles` - Complete profile list
    async fn save_all(&self, profiles: &[SettingsProfile]) -> CoreResult<()>;
}
