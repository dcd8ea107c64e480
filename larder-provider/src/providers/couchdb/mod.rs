//! Apache `CouchDB` provider
//!
//! Each record kind lives in its own database; `projectId`/`apiKey` are the
//! HTTP basic credentials.

mod error;
mod http;
mod provider;

use crate::http_client::MAX_RETRIES;
use crate::providers::common::{FieldMapping, LazyClient};
use crate::types::{ProviderConfig, RecordKind};

/// Prefix of design documents, which are not records.
pub(crate) const DESIGN_DOC_PREFIX: &str = "_design/";

const FOOD_FIELDS: &[FieldMapping] = &[
    FieldMapping::ro("id", "_id"),
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
    FieldMapping::ro("id", "_id"),
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

/// Apache `CouchDB` backend.
pub struct CouchDbService {
    pub(crate) config: ProviderConfig,
    pub(crate) client: LazyClient,
    pub(crate) max_retries: u32,
}

impl CouchDbService {
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
