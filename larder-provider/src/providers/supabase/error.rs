//! Supabase error mapping

use serde::Deserialize;

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::SupabaseService;

/// `{"code": "PGRST301", "message": "JWT expired", "details": null, "hint": null}`
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    code: Option<String>,
    #[serde(default)]
    message: String,
    details: Option<String>,
}

impl ProviderErrorMapper for SupabaseService {
    fn provider_name(&self) -> &'static str {
        "supabase"
    }

    fn raw_error(&self, status: u16, body: &str) -> RawApiError {
        let Ok(parsed) = serde_json::from_str::<PostgrestErrorBody>(body) else {
            return RawApiError::new(status, body);
        };
        let message = match parsed.details {
            Some(details) if !details.is_empty() => format!("{} ({details})", parsed.message),
            _ => parsed.message,
        };
        match parsed.code {
            Some(code) => RawApiError::with_code(status, code, message),
            None => RawApiError::new(status, message),
        }
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // JWT rejected / missing
            Some("PGRST301" | "PGRST302") => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },
            // insufficient_privilege (row level security, grants)
            Some("42501") => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },
            _ => self.map_status(raw, context),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProviderConfig;

    fn service() -> SupabaseService {
        SupabaseService::new(ProviderConfig::default())
    }

    #[test]
    fn expired_jwt() {
        let body = r#"{"code":"PGRST301","details":null,"hint":null,"message":"JWT expired"}"#;
        let err = service().error_from_response(401, body, ErrorContext::default());
        assert!(matches!(err, ProviderError::InvalidCredentials { .. }));
    }

    #[test]
    fn row_level_security() {
        let body = r#"{"code":"42501","details":null,"hint":null,"message":"new row violates row-level security policy for table \"foods\""}"#;
        let err = service().error_from_response(403, body, ErrorContext::default());
        assert!(matches!(err, ProviderError::PermissionDenied { .. }));
    }

    #[test]
    fn details_are_appended() {
        let body = r#"{"code":"23502","details":"Failing row contains (1, null).","hint":null,"message":"null value in column \"name\" violates not-null constraint"}"#;
        let err = service().error_from_response(400, body, ErrorContext::default());
        assert!(matches!(
            err,
            ProviderError::Api { raw_message, .. } if raw_message.ends_with("(Failing row contains (1, null).)")
        ));
    }

    #[test]
    fn gateway_invalid_key() {
        let err = service().error_from_response(
            401,
            r#"{"message":"Invalid API key"}"#,
            ErrorContext::default(),
        );
        assert!(matches!(err, ProviderError::InvalidCredentials { .. }));
    }
}
