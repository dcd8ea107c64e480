//! Parse-compatible REST provider

mod error;
mod http;
mod provider;

use crate::http_client::MAX_RETRIES;
use crate::providers::common::{FieldMapping, LazyClient};
use crate::types::{ProviderConfig, RecordKind};

/// Parse caps `limit` at this value.
pub(crate) const MAX_QUERY_LIMIT: u32 = 1000;

const FOOD_FIELDS: &[FieldMapping] = &[
    FieldMapping::ro("id", "objectId"),
    FieldMapping::rw("foodName", "foodName"),
    FieldMapping::rw("category", "category"),
    FieldMapping::rw("quantity", "quantity"),
    FieldMapping::rw("purchaseDate", "purchaseDate"),
    FieldMapping::rw("expiryDate", "expiryDate"),
    FieldMapping::rw("price", "price"),
    FieldMapping::rw("notes", "notes"),
    FieldMapping::ro("createdAt", "createdAt"),
    FieldMapping::ro("updatedAt", "updatedAt"),
];

const SUBSCRIPTION_FIELDS: &[FieldMapping] = &[
    FieldMapping::ro("id", "objectId"),
    FieldMapping::rw("name", "name"),
    FieldMapping::rw("price", "price"),
    FieldMapping::rw("billingCycle", "billingCycle"),
    FieldMapping::rw("startDate", "startDate"),
    FieldMapping::rw("nextPaymentDate", "nextPaymentDate"),
    FieldMapping::rw("category", "category"),
    FieldMapping::rw("notes", "notes"),
    FieldMapping::ro("createdAt", "createdAt"),
    FieldMapping::ro("updatedAt", "updatedAt"),
];

pub(crate) const fn fields(kind: RecordKind) -> &'static [FieldMapping] {
    match kind {
        RecordKind::Food => FOOD_FIELDS,
        RecordKind::Subscription => SUBSCRIPTION_FIELDS,
    }
}

/// Parse Server backend (self-hosted or Back4App).
///
/// `url` is the server mount point (e.g. `https://parseapi.back4app.com`);
/// collections are class names.
pub struct ParseService {
    pub(crate) config: ProviderConfig,
    pub(crate) client: LazyClient,
    pub(crate) max_retries: u32,
}

impl ParseService {
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
