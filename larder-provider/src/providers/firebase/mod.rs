//! Firebase Realtime Database provider
//!
//! Records are children of the configured collection path, keyed by the
//! push id Firebase generates on create.

mod error;
mod http;
mod provider;

use crate::http_client::MAX_RETRIES;
use crate::providers::common::{FieldMapping, LazyClient};
use crate::types::{ProviderConfig, RecordKind};

/// Synthetic native field carrying the child key of a record.
pub(crate) const KEY_FIELD: &str = "$key";

const FOOD_FIELDS: &[FieldMapping] = &[
    FieldMapping::ro("id", KEY_FIELD),
    FieldMapping::rw("foodName", "foodName"),
    FieldMapping::rw("category", "category"),
    FieldMapping::rw("quantity", "quantity"),
    FieldMapping::rw("purchaseDate", "purchaseDate"),
    FieldMapping::rw("expiryDate", "expiryDate"),
    FieldMapping::rw("price", "price"),
    FieldMapping::rw("notes", "notes"),
    FieldMapping::rw("createdAt", "createdAt"),
    FieldMapping::rw("updatedAt", "updatedAt"),
];

const SUBSCRIPTION_FIELDS: &[FieldMapping] = &[
    FieldMapping::ro("id", KEY_FIELD),
    FieldMapping::rw("name", "name"),
    FieldMapping::rw("price", "price"),
    FieldMapping::rw("billingCycle", "billingCycle"),
    FieldMapping::rw("startDate", "startDate"),
    FieldMapping::rw("nextPaymentDate", "nextPaymentDate"),
    FieldMapping::rw("category", "category"),
    FieldMapping::rw("notes", "notes"),
    FieldMapping::rw("createdAt", "createdAt"),
    FieldMapping::rw("updatedAt", "updatedAt"),
];

pub(crate) const fn fields(kind: RecordKind) -> &'static [FieldMapping] {
    match kind {
        RecordKind::Food => FOOD_FIELDS,
        RecordKind::Subscription => SUBSCRIPTION_FIELDS,
    }
}

/// Firebase Realtime Database backend.
///
/// `apiKey` is sent as the `auth` query parameter (database secret or ID token).
pub struct FirebaseService {
    pub(crate) config: ProviderConfig,
    pub(crate) client: LazyClient,
    pub(crate) max_retries: u32,
}

impl FirebaseService {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            client: LazyClient::new(),
            max_retries: MAX_RETRIES,
        }
    }

    /// Retries for transient failures on idempotent requests.
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }
}
