//! `CouchDB` error mapping

use serde::Deserialize;

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::CouchDbService;

/// `{"error": "not_found", "reason": "missing"}`
#[derive(Debug, Deserialize)]
struct CouchErrorBody {
    error: String,
    #[serde(default)]
    reason: String,
}

impl ProviderErrorMapper for CouchDbService {
    fn provider_name(&self) -> &'static str {
        "couchdb"
    }

    fn raw_error(&self, status: u16, body: &str) -> RawApiError {
        match serde_json::from_str::<CouchErrorBody>(body) {
            Ok(CouchErrorBody { error, reason }) if reason.is_empty() => {
                RawApiError::with_code(status, error.clone(), error)
            }
            Ok(CouchErrorBody { error, reason }) => RawApiError::with_code(status, error, reason),
            Err(_) => RawApiError::new(status, body),
        }
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            Some("unauthorized") => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },
            // "Database does not exist." also comes back as not_found.
            Some("not_found") if raw.message.contains("Database does not exist") => {
                self.api_error(raw)
            }
            _ => self.map_status(raw, context),
        }
    }
}
