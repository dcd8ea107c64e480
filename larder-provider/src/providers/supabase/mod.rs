//! Supabase (`PostgREST`) provider

mod error;
mod http;
mod provider;

use crate::http_client::MAX_RETRIES;
use crate::providers::common::{FieldMapping, LazyClient};
use crate::types::{ProviderConfig, RecordKind};

/// `PostgREST` mount point below the project URL.
pub(crate) const REST_PATH: &str = "/rest/v1";

/// Makes writes return the affected rows.
pub(crate) const RETURN_REPRESENTATION: &str = "return=representation";

const FOOD_FIELDS: &[FieldMapping] = &[
    FieldMapping::ro("id", "id"),
    FieldMapping::rw("foodName", "food_name"),
    FieldMapping::rw("category", "category"),
    FieldMapping::rw("quantity", "quantity"),
    FieldMapping::rw("purchaseDate", "purchase_date"),
    FieldMapping::rw("expiryDate", "expiry_date"),
    FieldMapping::rw("price", "price"),
    FieldMapping::rw("notes", "notes"),
    FieldMapping::rw("createdAt", "created_at"),
    FieldMapping::rw("updatedAt", "updated_at"),
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
    FieldMapping::rw("createdAt", "created_at"),
    FieldMapping::rw("updatedAt", "updated_at"),
];

pub(crate) const fn fields(kind: RecordKind) -> &'static [FieldMapping] {
    match kind {
        RecordKind::Food => FOOD_FIELDS,
        RecordKind::Subscription => SUBSCRIPTION_FIELDS,
    }
}

/// Supabase backend; collections are table names in the exposed schema.
pub struct SupabaseService {
    pub(crate) config: ProviderConfig,
    pub(crate) client: LazyClient,
    pub(crate) max_retries: u32,
}

impl SupabaseService {
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
