//! Firebase error mapping

use serde::Deserialize;

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::FirebaseService;

/// `{"error": "Permission denied"}`
#[derive(Debug, Deserialize)]
struct FirebaseErrorBody {
    error: String,
}

impl ProviderErrorMapper for FirebaseService {
    fn provider_name(&self) -> &'static str {
        "firebase"
    }

    fn raw_error(&self, status: u16, body: &str) -> RawApiError {
        serde_json::from_str::<FirebaseErrorBody>(body).map_or_else(
            |_| RawApiError::new(status, body),
            |parsed| RawApiError::new(status, parsed.error),
        )
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        // Security-rule rejections come back as 401 with this message.
        if raw.message.eq_ignore_ascii_case("permission denied") {
            return ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            };
        }
        self.map_status(raw, context)
    }
}
