//! Larder Core Library
//!
//! Platform-independent logic on top of `larder-provider`:
//! - [`CrudManager`]: validated, timestamped record operations and sequential batch deletes
//! - [`ProfileStore`]: named settings profiles with import/export
//! - [`ActiveServiceHandle`]: the backend service currently in use
//!
//! Storage is abstracted through the [`ProfileRepository`] and [`ConfigStore`] traits;
//! the platform layer supplies implementations through [`ServiceContext`].

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{BatchFailure, CoreError, CoreResult, ValidationFailure};
pub use services::{
    ActiveServiceHandle, CrudManager, ProfileStore, ProviderMetadataService, ServiceContext,
};
pub use traits::{ConfigStore, ProfileRepository};
