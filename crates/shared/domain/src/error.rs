//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use thiserror::Error;

/// Domain-specific errors for business rule violations.
///
/// Every variant renders its bare message so callers can prefix or forward it
/// without having to strip a label first.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value object was built from malformed input
    #[error("{0}")]
    InvalidFormat(String),

    /// An entity invariant was violated
    #[error("{0}")]
    Validation(String),

    /// A required component was not supplied at all
    #[error("{0}")]
    NullArgument(String),
}

impl DomainError {
    /// Create an invalid format error
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        DomainError::InvalidFormat(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create a null argument error
    pub fn null_argument(msg: impl Into<String>) -> Self {
        DomainError::NullArgument(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
