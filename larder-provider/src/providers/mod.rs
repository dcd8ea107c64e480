//! Backend provider implementations

/// Shared utilities used by provider implementations.
pub(crate) mod common;

mod appwrite;
mod couchdb;
mod directus;
mod firebase;
mod parse;
mod supabase;

pub use appwrite::AppwriteService;
pub use couchdb::CouchDbService;
pub use directus::DirectusService;
pub use firebase::FirebaseService;
pub use parse::ParseService;
pub use supabase::SupabaseService;
