//! Utility modules.

/// Date/time serialization helpers shared by records and profiles.
pub mod datetime;

/// Tolerant deserializers for backends that disagree on JSON scalar types.
pub mod lenient;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;
