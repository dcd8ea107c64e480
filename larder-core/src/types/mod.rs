//! Type definitions

mod config;
mod export;
mod profile;
mod response;

pub use config::ActiveConfig;
pub use export::ExportSelection;
pub use profile::SettingsProfile;
pub use response::OpResult;

// Re-export public types of the provider crate
pub use larder_provider::{
    ConfigField, ConfigKey, Food, ProviderConfig, ProviderKind, ProviderMetadata, Record,
    RecordKind, Subscription,
};
