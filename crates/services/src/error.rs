//! Service-level error model.

use restock_core::DomainError;
use restock_infra::{ExternalSourceError, StoreError};
use thiserror::Error;

/// Failure of a catalog or replenishment operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Bad input; surfaced to the caller as a rejection, never retried.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced product or order does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    External(#[from] ExternalSourceError),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
            DomainError::NotFound(msg) => Self::NotFound(msg),
            DomainError::DuplicateCode(code) => {
                Self::Store(StoreError::DuplicateCode(code.into()))
            }
        }
    }
}
