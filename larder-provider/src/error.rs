use serde::{Deserialize, Serialize};

/// Unified error type for all backend provider operations.
///
/// Each variant includes a `provider` field identifying which provider produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`ConnectionFailed`](Self::ConnectionFailed): network connectivity issues
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): API rate limit exceeded
///
/// The built-in HTTP client automatically retries these with exponential backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// One or more required configuration fields are blank.
    ///
    /// Raised before any network I/O takes place.
    ConfigurationMissing {
        /// Provider that produced the error.
        provider: String,
        /// Keys of the blank fields (e.g. `"url"`, `"apiKey"`).
        fields: Vec<String>,
    },

    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    ///
    /// This is a transient error and is automatically retried.
    ConnectionFailed {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    ///
    /// This is a transient error and is automatically retried.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The provided API key or credentials were rejected.
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The credentials are valid but lack permission for the requested operation.
    PermissionDenied {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The specified record does not exist in the backing collection.
    RecordNotFound {
        /// Provider that produced the error.
        provider: String,
        /// ID of the record that was not found.
        record_id: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded (HTTP 429 or equivalent).
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the provider's API response.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// An error response from the provider API without a more specific mapping.
    Api {
        /// Provider that produced the error.
        provider: String,
        /// HTTP status code, if the error came from an HTTP response.
        status: Option<u16>,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },

    /// A provider kind name outside the supported set.
    ///
    /// This is a construction-time programming error: the kind enumeration is closed,
    /// so it can only be reached by parsing an unknown name.
    UnsupportedKind {
        /// The rejected kind name.
        kind: String,
    },
}

impl ProviderError {
    /// Whether the error is expected behaviour (user input, missing resource, etc.),
    /// used for log level classification.
    ///
    /// Use `warn` when this returns `true` and `error` otherwise.
    /// **Keep this in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::ConfigurationMissing { .. }
                | Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::RecordNotFound { .. }
                | Self::UnsupportedKind { .. }
        )
    }

    /// Whether the error is transient and the request may succeed when retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigurationMissing { provider, fields } => {
                write!(
                    f,
                    "[{provider}] Missing configuration: {}",
                    fields.join(", ")
                )
            }
            Self::ConnectionFailed { provider, detail } => {
                write!(f, "[{provider}] Connection failed: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{provider}] Invalid credentials")
                }
            }
            Self::PermissionDenied {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Permission denied: {msg}")
                } else {
                    write!(f, "[{provider}] Permission denied")
                }
            }
            Self::RecordNotFound {
                provider,
                record_id,
                ..
            } => {
                write!(f, "[{provider}] Record '{record_id}' not found")
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
            Self::Api {
                provider,
                status,
                raw_message,
                ..
            } => {
                if let Some(status) = status {
                    write!(f, "[{provider}] HTTP {status}: {raw_message}")
                } else {
                    write!(f, "[{provider}] {raw_message}")
                }
            }
            Self::UnsupportedKind { kind } => {
                write!(f, "Unsupported provider kind: {kind}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
