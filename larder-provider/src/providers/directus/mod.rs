//! Directus items provider

mod error;
mod http;
mod provider;

use crate::http_client::MAX_RETRIES;
use crate::providers::common::{FieldMapping, LazyClient};
use crate::types::{ProviderConfig, RecordKind};

const FOOD_FIELDS: &[FieldMapping] = &[
    FieldMapping::ro("id", "id"),
    FieldMapping::rw("foodName", "food_name"),
    FieldMapping::rw("category", "category"),
    FieldMapping::rw("quantity", "quantity"),
    FieldMapping::rw("purchaseDate", "purchase_date"),
    FieldMapping::rw("expiryDate", "expiry_date"),
    FieldMapping::rw("price", "price"),
    FieldMapping::rw("notes", "notes"),
    FieldMapping::ro("createdAt", "date_created"),
    FieldMapping::ro("updatedAt", "date_updated"),
];

const SUBSCRIPTION_FIELDS: &[FieldMapping] = &[
    FieldMapping::ro("id", "id"),
    FieldMapping::rw("name", "name"),
    FieldMapping::rw("price", "price"),
    FieldMapping::rw("billingCycle", "billing_cycle"),
    FieldMapping::rw("startDate", "start_date"),
    FieldMapping::rw("nextPaymentDate", "next_payment_date"),
    FieldMapping::rw("category", "category"),
    FieldMapping::rw("notes", "notes"),
    FieldMapping::ro("createdAt", "date_created"),
    FieldMapping::ro("updatedAt", "date_updated"),
];

pub(crate) const fn fields(kind: RecordKind) -> &'static [FieldMapping] {
    match kind {
        RecordKind::Food => FOOD_FIELDS,
        RecordKind::Subscription => SUBSCRIPTION_FIELDS,
    }
}

/// Directus headless CMS backend using a static access token.
pub struct DirectusService {
    pub(crate) config: ProviderConfig,
    pub(crate) client: LazyClient,
    pub(crate) max_retries: u32,
}

impl DirectusService {
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
