//! Domain-level errors.
//!
//! These errors represent business rule violations on student records.
//! They are independent of infrastructure concerns (document store, files).

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The student has never been persisted, so it has no store identifier
    #[error("Student has no document id")]
    MissingDocumentId,
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
