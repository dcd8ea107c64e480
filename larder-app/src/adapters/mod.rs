//! File-based storage adapters

mod json_config_store;
mod json_file;
mod json_profile_repository;

pub use json_config_store::{
    ENV_API_KEY, ENV_PROJECT_ID, ENV_PROVIDER, ENV_URL, JsonConfigStore, apply_overrides,
};
pub use json_file::MAX_STORE_FILE_SIZE;
pub use json_profile_repository::JsonProfileRepository;
