//! Helpers shared by the provider implementations.

use std::sync::OnceLock;

use reqwest::{Client, RequestBuilder};
use serde_json::{Map, Value};

use crate::error::{ProviderError, Result};
use crate::http_client::{CONNECT_TIMEOUT, HttpUtils, REQUEST_TIMEOUT};
use crate::traits::{ErrorContext, ProviderErrorMapper};
use crate::types::{ConfigKey, ProviderConfig, Record};

// ============ HTTP Client ============

/// Creates an HTTP client with the crate-wide timeouts.
pub fn create_http_client(provider: &str) -> Result<Client> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| ProviderError::ConnectionFailed {
            provider: provider.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// HTTP client built on first use and reused afterwards.
#[derive(Debug, Default)]
pub struct LazyClient {
    cell: OnceLock<Client>,
}

impl LazyClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the client, building it on the first call.
    pub fn get(&self, provider: &str) -> Result<&Client> {
        if let Some(client) = self.cell.get() {
            return Ok(client);
        }
        let client = create_http_client(provider)?;
        log::debug!("[{provider}] HTTP client created");
        Ok(self.cell.get_or_init(|| client))
    }

    #[cfg(test)]
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

/// Fails with `ConfigurationMissing` when any required field is blank.
pub fn ensure_configured(
    provider: &str,
    config: &ProviderConfig,
    required: &[ConfigKey],
) -> Result<()> {
    let fields = config.missing_fields(required);
    if fields.is_empty() {
        Ok(())
    } else {
        Err(ProviderError::ConfigurationMissing {
            provider: provider.to_string(),
            fields,
        })
    }
}

/// Retries allowed for `method`.
///
/// Every variant creates records with POST. A create whose response was lost
/// may already be committed, so POST is sent exactly once.
#[must_use]
pub fn retries_for(method: &str, max_retries: u32) -> u32 {
    if method.eq_ignore_ascii_case("POST") {
        0
    } else {
        max_retries
    }
}

/// Sends a request with retry and maps non-2xx responses through `mapper`.
///
/// Returns `(status, body)` for 2xx responses. POST is never retried.
pub async fn send<M: ProviderErrorMapper>(
    mapper: &M,
    request: RequestBuilder,
    method: &str,
    url: &str,
    max_retries: u32,
    context: ErrorContext,
) -> Result<(u16, String)> {
    let provider = mapper.provider_name();
    let retries = retries_for(method, max_retries);
    let (status, body) =
        HttpUtils::execute_request_with_retry(request, provider, method, url, retries).await?;

    if (200..300).contains(&status) {
        return Ok((status, body));
    }

    let err = mapper.error_from_response(status, &body, context);
    if err.is_expected() {
        log::warn!("[{provider}] {method} failed: {err}");
    } else {
        log::error!("[{provider}] {method} failed: {err}");
    }
    Err(err)
}

/// Parses a body that must be a JSON object.
pub fn parse_object<M: ProviderErrorMapper>(mapper: &M, body: &str) -> Result<Map<String, Value>> {
    match HttpUtils::parse_json::<Value>(body, mapper.provider_name())? {
        Value::Object(map) => Ok(map),
        other => Err(mapper.parse_error(format!("expected a JSON object, got {other}"))),
    }
}

// ============ Field Mapping ============

/// Whether a mapped field is written to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Written on create/update and read back.
    ReadWrite,
    /// Server-managed; read back but never written.
    ReadOnly,
}

/// Canonical field name to provider-native field name.
#[derive(Debug, Clone, Copy)]
pub struct FieldMapping {
    pub canonical: &'static str,
    pub native: &'static str,
    pub access: Access,
}

impl FieldMapping {
    pub const fn rw(canonical: &'static str, native: &'static str) -> Self {
        Self {
            canonical,
            native,
            access: Access::ReadWrite,
        }
    }

    pub const fn ro(canonical: &'static str, native: &'static str) -> Self {
        Self {
            canonical,
            native,
            access: Access::ReadOnly,
        }
    }
}

/// Converts a canonical record into the provider-native JSON object.
///
/// Only read-write mappings are emitted; unset (null) values are omitted.
pub fn to_native<R: Record>(
    provider: &str,
    record: &R,
    mappings: &[FieldMapping],
) -> Result<Map<String, Value>> {
    let canonical = match serde_json::to_value(record) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            return Err(ProviderError::SerializationError {
                provider: provider.to_string(),
                detail: "record did not serialize to an object".to_string(),
            });
        }
        Err(e) => {
            return Err(ProviderError::SerializationError {
                provider: provider.to_string(),
                detail: e.to_string(),
            });
        }
    };

    let mut native = Map::new();
    for mapping in mappings.iter().filter(|m| m.access == Access::ReadWrite) {
        match canonical.get(mapping.canonical) {
            Some(Value::Null) | None => {}
            Some(value) => {
                native.insert(mapping.native.to_string(), value.clone());
            }
        }
    }
    Ok(native)
}

/// Converts a provider-native JSON object into a canonical record.
///
/// Fields absent from the native object take their defaults.
pub fn from_native<R: Record>(
    provider: &str,
    native: &Map<String, Value>,
    mappings: &[FieldMapping],
) -> Result<R> {
    let mut canonical = Map::new();
    for mapping in mappings {
        if let Some(value) = native.get(mapping.native) {
            canonical.insert(mapping.canonical.to_string(), value.clone());
        }
    }
    serde_json::from_value(Value::Object(canonical)).map_err(|e| ProviderError::ParseError {
        provider: provider.to_string(),
        detail: format!("{} record: {e}", R::KIND),
    })
}

/// Converts every element of a JSON array of native objects.
pub fn from_native_list<R: Record>(
    provider: &str,
    items: &[Value],
    mappings: &[FieldMapping],
) -> Result<Vec<R>> {
    items
        .iter()
        .map(|item| match item {
            Value::Object(map) => from_native(provider, map, mappings),
            other => Err(ProviderError::ParseError {
                provider: provider.to_string(),
                detail: format!("expected a {} object, got {other}", R::KIND),
            }),
        })
        .collect()
}
