use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{Food, ProviderKind, ProviderMetadata, Subscription};

/// Error payload extracted from a non-success response (internal).
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP status, when the error came from a response.
    pub status: Option<u16>,
    /// Backend-specific error code (string or stringified number).
    pub code: Option<String>,
    /// Backend error message.
    pub message: String,
}

impl RawApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Extra information available while mapping an error (internal).
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Record the request addressed, used for `RecordNotFound`.
    pub record_id: Option<String>,
}

impl ErrorContext {
    pub fn record(id: &str) -> Self {
        Self {
            record_id: Some(id.to_string()),
        }
    }
}

/// Maps backend error responses into [`ProviderError`] (internal).
///
/// Variants implement [`raw_error`](Self::raw_error) for their error body
/// format and may override [`map_error`](Self::map_error) to recognise
/// backend-specific codes before falling back to
/// [`map_status`](Self::map_status).
pub(crate) trait ProviderErrorMapper {
    /// Provider identifier used in error values and logs.
    fn provider_name(&self) -> &'static str;

    /// Extracts code and message from an error body.
    fn raw_error(&self, status: u16, body: &str) -> RawApiError;

    /// Maps a raw API error to the unified error type.
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        self.map_status(raw, context)
    }

    /// HTTP status based mapping shared by every variant.
    fn map_status(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        match raw.status {
            Some(401) => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
            },
            Some(403) => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(raw.message),
            },
            Some(404) if context.record_id.is_some() => ProviderError::RecordNotFound {
                provider,
                record_id: context.record_id.unwrap_or_default(),
                raw_message: Some(raw.message),
            },
            Some(429) => ProviderError::RateLimited {
                provider,
                retry_after: None,
                raw_message: Some(raw.message),
            },
            _ => self.api_error(raw),
        }
    }

    /// Maps an error response straight from its status and body.
    fn error_from_response(&self, status: u16, body: &str, context: ErrorContext) -> ProviderError {
        self.map_error(self.raw_error(status, body), context)
    }

    /// Shortcut: response parse error.
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Shortcut: unmapped API error (fallback).
    fn api_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Api {
            provider: self.provider_name().to_string(),
            status: raw.status,
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }

    /// Shortcut: a record lookup came back empty.
    fn record_not_found(&self, record_id: &str) -> ProviderError {
        ProviderError::RecordNotFound {
            provider: self.provider_name().to_string(),
            record_id: record_id.to_string(),
            raw_message: None,
        }
    }
}

/// Uniform CRUD contract over one backend data provider.
///
/// Implementations never panic; every failure (missing configuration,
/// network error, malformed response) is returned as an `Err` value.
/// Instances are created through [`create_service`](crate::create_service)
/// and shared as `Arc<dyn BackendService>`.
#[async_trait]
pub trait BackendService: Send + Sync {
    /// Provider identifier (e.g. `"appwrite"`).
    fn service_name(&self) -> &'static str;

    /// Provider kind of this instance.
    fn service_kind(&self) -> ProviderKind;

    /// Provider metadata (type-level).
    ///
    /// Does not need an instance, so UIs can list providers and their
    /// required fields before any configuration exists.
    fn metadata() -> ProviderMetadata
    where
        Self: Sized;

    /// Prepares the HTTP client and verifies connectivity.
    ///
    /// Idempotent. Returns `false` when required configuration is blank or
    /// the connection test fails.
    async fn initialize(&self) -> bool;

    /// Checks connectivity and credentials. Never fails; any problem yields `false`.
    async fn test_connection(&self) -> bool;

    /// Lists every food record.
    async fn get_all_foods(&self) -> Result<Vec<Food>>;

    /// Creates a food record; the returned record carries the provider-assigned id.
    async fn create_food(&self, food: &Food) -> Result<Food>;

    /// Updates the food record with `id`.
    async fn update_food(&self, id: &str, food: &Food) -> Result<Food>;

    /// Deletes the food record with `id`. `Ok(false)` when the backend reports nothing was deleted.
    async fn delete_food(&self, id: &str) -> Result<bool>;

    /// Lists every subscription record.
    async fn get_all_subscriptions(&self) -> Result<Vec<Subscription>>;

    /// Creates a subscription record.
    async fn create_subscription(&self, subscription: &Subscription) -> Result<Subscription>;

    /// Updates the subscription record with `id`.
    async fn update_subscription(&self, id: &str, subscription: &Subscription)
    -> Result<Subscription>;

    /// Deletes the subscription record with `id`.
    async fn delete_subscription(&self, id: &str) -> Result<bool>;
}
