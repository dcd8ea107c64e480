//! Active configuration persistence Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::ActiveConfig;

/// Reads and writes the active provider configuration.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Current configuration; defaults when nothing was saved.
    async fn load(&self) -> CoreResult<ActiveConfig>;

    /// Persist `config` as the active configuration.
    async fn save(&self, config: &ActiveConfig) -> CoreResult<()>;
}
