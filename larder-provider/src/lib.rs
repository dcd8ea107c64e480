//! # larder-provider
//!
//! A uniform CRUD abstraction over interchangeable backend data providers for
//! two record types: [`Food`] and [`Subscription`].
//!
//! ## Supported Providers
//!
//! | Provider | Kind | Auth Method |
//! |----------|------|-------------|
//! | [Appwrite](https://appwrite.io/) | `appwrite` | Project + API key headers |
//! | [Apache CouchDB](https://couchdb.apache.org/) | `couchdb` | HTTP basic |
//! | [Firebase Realtime Database](https://firebase.google.com/products/realtime-database) | `firebase` | `auth` query parameter |
//! | [Directus](https://directus.io/) | `directus` | Bearer token |
//! | [Parse](https://parseplatform.org/) | `parse` | Application ID + REST key headers |
//! | [Supabase](https://supabase.com/) | `supabase` | `apikey` + Bearer |
//!
//! ## Feature Flags
//!
//! - **`rustls`** *(default)*: use rustls.
//! - **`native-tls`**: use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use larder_provider::{create_service, Food, ProviderConfig, ProviderKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ProviderConfig {
//!         url: "https://abc.supabase.co".to_string(),
//!         api_key: "your-key".to_string(),
//!         food_collection: "foods".to_string(),
//!         subscription_collection: "subscriptions".to_string(),
//!         ..Default::default()
//!     };
//!     let service = create_service(ProviderKind::Supabase, config);
//!
//!     if !service.initialize().await {
//!         return Err("backend unreachable".into());
//!     }
//!
//!     let created = service
//!         .create_food(&Food { food_name: "Rice".to_string(), ..Default::default() })
//!         .await?;
//!     for food in service.get_all_foods().await? {
//!         println!("{} {}", food.id, food.food_name);
//!     }
//!     service.delete_food(&created.id).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, ProviderError>`](ProviderError); nothing
//! panics. Blank required configuration fails with
//! [`ProviderError::ConfigurationMissing`] before any network I/O.
//! Transient errors (`ConnectionFailed`, `Timeout`, `RateLimited`) are
//! retried with exponential backoff.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};

pub use factory::{create_service, create_service_by_name, get_all_provider_metadata};

// Internal traits (error mapping) are not exported.
pub use traits::BackendService;

pub use types::{
    ConfigField, ConfigKey, FieldType, Food, ProviderConfig, ProviderKind, ProviderMetadata,
    Record, RecordKind, Subscription,
};

pub use utils::datetime;

pub use providers::{
    AppwriteService, CouchDbService, DirectusService, FirebaseService, ParseService,
    SupabaseService,
};
