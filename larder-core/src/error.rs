//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use larder_provider::ProviderError;

/// Reason a record or request was rejected before reaching a backend.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail")]
pub enum ValidationFailure {
    /// No record was supplied.
    #[error("record is required")]
    NullRecord,

    /// The record's name is blank.
    #[error("name must not be blank")]
    EmptyName,

    /// A subscription price below zero.
    #[error("price must not be negative")]
    NegativePrice,

    /// A blank record id was passed to update/delete.
    #[error("record id must not be blank")]
    MissingId,

    /// A batch operation received no ids.
    #[error("id list must not be empty")]
    EmptyIdList,

    /// Profile name blank or too long.
    #[error("invalid profile name: {0}")]
    InvalidProfileName(String),
}

/// One failed item of a batch operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailure {
    /// Record id or profile name the failure belongs to.
    pub item: String,
    /// Human-readable reason.
    pub reason: String,
}

fn format_failures(failures: &[BatchFailure]) -> String {
    if failures.is_empty() {
        return String::new();
    }
    let reasons: Vec<String> = failures
        .iter()
        .map(|f| format!("{}: {}", f.item, f.reason))
        .collect();
    format!("; {}", reasons.join("; "))
}

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Input rejected before any I/O
    #[error("Validation failed: {0}")]
    ValidationFailed(ValidationFailure),

    /// Profile not found
    #[error("Profile not found: {0}")]
    NotFound(String),

    /// Another profile already uses this name (case-insensitive)
    #[error("A profile named '{0}' already exists")]
    DuplicateName(String),

    /// The profile store is full
    #[error("Profile limit of {limit} reached")]
    ProfileLimitExceeded { limit: usize },

    /// Import payload could not be parsed
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Some items of a sequential batch failed; the others were applied.
    #[error(
        "partial failure: succeeded={succeeded}, failed={failed}{}",
        format_failures(.failures)
    )]
    PartialBatchFailure {
        succeeded: usize,
        failed: usize,
        failures: Vec<BatchFailure>,
    },

    /// No backend service has been installed
    #[error("No active backend service")]
    NoActiveService,

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl From<ValidationFailure> for CoreError {
    fn from(failure: ValidationFailure) -> Self {
        Self::ValidationFailed(failure)
    }
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationFailed(_)
            | Self::NotFound(_)
            | Self::DuplicateName(_)
            | Self::ProfileLimitExceeded { .. }
            | Self::InvalidFormat(_)
            | Self::NoActiveService => true,
            Self::Provider(e) => e.is_expected(),
            _ => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
