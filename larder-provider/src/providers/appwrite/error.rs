//! Appwrite error mapping

use serde::Deserialize;

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::AppwriteService;

/// `{"message": "...", "code": 404, "type": "document_not_found"}`
#[derive(Debug, Deserialize)]
struct AppwriteErrorBody {
    #[serde(default)]
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl ProviderErrorMapper for AppwriteService {
    fn provider_name(&self) -> &'static str {
        "appwrite"
    }

    fn raw_error(&self, status: u16, body: &str) -> RawApiError {
        match serde_json::from_str::<AppwriteErrorBody>(body) {
            Ok(AppwriteErrorBody {
                message,
                kind: Some(kind),
            }) => RawApiError::with_code(status, kind, message),
            Ok(AppwriteErrorBody { message, kind: None }) => RawApiError::new(status, message),
            Err(_) => RawApiError::new(status, body),
        }
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            Some("document_not_found") if context.record_id.is_some() => {
                ProviderError::RecordNotFound {
                    provider: self.provider_name().to_string(),
                    record_id: context.record_id.unwrap_or_default(),
                    raw_message: Some(raw.message),
                }
            }
            // Missing database/collection is a configuration problem, not a missing record.
            Some("database_not_found" | "collection_not_found") => self.api_error(raw),
            Some("general_unauthorized_scope" | "user_unauthorized") => {
                ProviderError::PermissionDenied {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }
            _ => self.map_status(raw, context),
        }
    }
}
