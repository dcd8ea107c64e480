//! Parse error mapping

use serde::Deserialize;
use serde_json::Value;

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::ParseService;

/// `{"code": 101, "error": "Object not found."}`
#[derive(Debug, Deserialize)]
struct ParseErrorBody {
    code: Option<Value>,
    #[serde(default)]
    error: String,
}

impl ProviderErrorMapper for ParseService {
    fn provider_name(&self) -> &'static str {
        "parse"
    }

    fn raw_error(&self, status: u16, body: &str) -> RawApiError {
        match serde_json::from_str::<ParseErrorBody>(body) {
            Ok(ParseErrorBody {
                code: Some(code),
                error,
            }) => {
                let code = code
                    .as_str()
                    .map_or_else(|| code.to_string(), str::to_string);
                RawApiError::with_code(status, code, error)
            }
            Ok(ParseErrorBody { code: None, error }) => RawApiError::new(status, error),
            Err(_) => RawApiError::new(status, body),
        }
    }

    /// Reference: <https://docs.parseplatform.org/rest/guide/#error-codes>
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // 101: ObjectNotFound
            Some("101") if context.record_id.is_some() => ProviderError::RecordNotFound {
                provider: self.provider_name().to_string(),
                record_id: context.record_id.unwrap_or_default(),
                raw_message: Some(raw.message),
            },
            // 209: InvalidSessionToken
            Some("209") => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },
            // 119: OperationForbidden
            Some("119") => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },
            // 155: RequestLimitExceeded
            Some("155") => ProviderError::RateLimited {
                provider: self.provider_name().to_string(),
                retry_after: None,
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

    fn service() -> ParseService {
        ParseService::new(ProviderConfig::default())
    }

    #[test]
    fn object_not_found() {
        let body = r#"{"code":101,"error":"Object not found."}"#;
        let err = service().error_from_response(404, body, ErrorContext::record("xWMyZ4YEGZ"));
        assert!(matches!(
            err,
            ProviderError::RecordNotFound { record_id, .. } if record_id == "xWMyZ4YEGZ"
        ));
    }

    #[test]
    fn unauthorized_without_code() {
        let err = service().error_from_response(401, r#"{"error":"unauthorized"}"#, ErrorContext::default());
        assert!(matches!(
            err,
            ProviderError::InvalidCredentials { raw_message: Some(m), .. } if m == "unauthorized"
        ));
    }

    #[test]
    fn request_limit_exceeded() {
        let body = r#"{"code":155,"error":"This application performed 1802 requests within the past minute"}"#;
        let err = service().error_from_response(400, body, ErrorContext::default());
        assert!(matches!(err, ProviderError::RateLimited { .. }));
    }

    #[test]
    fn unknown_code_is_api_error() {
        let body = r#"{"code":111,"error":"schema mismatch for Food.price; expected Number but got String"}"#;
        let err = service().error_from_response(400, body, ErrorContext::default());
        assert!(matches!(
            err,
            ProviderError::Api { raw_code: Some(code), .. } if code == "111"
        ));
    }
}
