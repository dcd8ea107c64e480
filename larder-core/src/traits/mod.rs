//! Storage layer abstraction trait definition

mod config_store;
mod profile_repository;

pub use config_store::ConfigStore;
pub use profile_repository::ProfileRepository;
