//! Directus error mapping

use serde::Deserialize;

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::DirectusService;

/// `{"errors": [{"message": "...", "extensions": {"code": "FORBIDDEN"}}]}`
#[derive(Debug, Deserialize)]
struct DirectusErrorBody {
    #[serde(default)]
    errors: Vec<DirectusError>,
}

#[derive(Debug, Deserialize)]
struct DirectusError {
    #[serde(default)]
    message: String,
    extensions: Option<DirectusErrorExtensions>,
}

#[derive(Debug, Deserialize)]
struct DirectusErrorExtensions {
    code: Option<String>,
}

impl ProviderErrorMapper for DirectusService {
    fn provider_name(&self) -> &'static str {
        "directus"
    }

    fn raw_error(&self, status: u16, body: &str) -> RawApiError {
        let first = serde_json::from_str::<DirectusErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.errors.into_iter().next());
        match first {
            Some(DirectusError {
                message,
                extensions: Some(DirectusErrorExtensions { code: Some(code) }),
            }) => RawApiError::with_code(status, code, message),
            Some(error) => RawApiError::new(status, error.message),
            None => RawApiError::new(status, body),
        }
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            Some("INVALID_CREDENTIALS" | "INVALID_TOKEN" | "TOKEN_EXPIRED") => {
                ProviderError::InvalidCredentials {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }
            Some("FORBIDDEN") => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },
            Some("REQUESTS_EXCEEDED") => ProviderError::RateLimited {
                provider: self.provider_name().to_string(),
                retry_after: None,
                raw_message: Some(raw.message),
            },
            _ => self.map_status(raw, context),
        }
    }
}
