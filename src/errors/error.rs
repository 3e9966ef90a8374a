use thiserror::Error;
use uuid::Uuid;

/// Record-store errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("Offset must not be negative, got {0}")]
    OffsetIsNegative(i64),

    #[error("Page size must be positive, got {0}")]
    CountIsNotPositive(i64),

    #[error("Record not found: {entity} with ID {id}")]
    RecordNotFound { entity: &'static str, id: Uuid },

    #[error("Store for {0} has been disposed")]
    Disposed(&'static str),

    #[error("Store error: {0}")]
    Other(String),
}

/// Domain-level errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Service-level errors (application specific)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// One or more errors occurred while clearing stores. Carries every
    /// caught failure, in the order the stores were attempted.
    #[error("One or more errors occurred while clearing stores ({} failed)", .0.len())]
    BulkDeleteFailed(Vec<DomainError>),
}

/// Validation errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Field '{field}' is required")]
    Required { field: String },

    #[error("Field '{field}' contains an invalid value: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ValidationError {
    pub fn required(field: &str) -> Self {
        Self::Required {
            field: field.to_string(),
        }
    }

    pub fn invalid_value(field: &str, reason: &str) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}
