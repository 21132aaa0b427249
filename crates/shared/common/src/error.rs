//! Unified error handling for store access and roster synchronization.
//!
//! Every asynchronous chain (parent write, child writes, refresh) ends in
//! one of these variants. Callers get them back as values; the service also
//! logs them where they occur.

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Store errors
    #[error("Write to {collection} failed: {reason}")]
    WriteFailed { collection: String, reason: String },

    #[error("Read of {collection} failed: {reason}")]
    ReadFailed { collection: String, reason: String },

    // Child collection errors
    #[error("{failed} of {total} phone writes failed for student {document_id}")]
    PartialChildWriteFailed {
        document_id: String,
        failed: usize,
        total: usize,
    },

    #[error("{failed} of {total} phone deletes/creates failed for student {document_id}")]
    PartialChildDeleteOrCreateFailed {
        document_id: String,
        failed: usize,
        total: usize,
    },

    // Input errors
    #[error("Student has no document id")]
    MissingDocumentId,

    #[error("{0}")]
    Validation(String),

    // Local persistence
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get a stable error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            AppError::WriteFailed { .. } => "WRITE_FAILED",
            AppError::ReadFailed { .. } => "READ_FAILED",
            AppError::PartialChildWriteFailed { .. } => "PARTIAL_CHILD_WRITE_FAILED",
            AppError::PartialChildDeleteOrCreateFailed { .. } => {
                "PARTIAL_CHILD_DELETE_OR_CREATE_FAILED"
            }
            AppError::MissingDocumentId => "MISSING_DOCUMENT_ID",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if the parent document was written even though the call failed
    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            AppError::PartialChildWriteFailed { .. }
                | AppError::PartialChildDeleteOrCreateFailed { .. }
        )
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MissingDocumentId => AppError::MissingDocumentId,
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn write_failed(collection: impl Into<String>, reason: impl ToString) -> Self {
        AppError::WriteFailed {
            collection: collection.into(),
            reason: reason.to_string(),
        }
    }

    pub fn read_failed(collection: impl Into<String>, reason: impl ToString) -> Self {
        AppError::ReadFailed {
            collection: collection.into(),
            reason: reason.to_string(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
