use thiserror::Error;

use crate::forms::products::ProductFormError;
use crate::repository::RepositoryError;

/// Result type returned by service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures surfaced by the service layer to the HTTP handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The referenced product does not exist.
    #[error("not found")]
    NotFound,
    /// The request payload failed validation.
    #[error("{0}")]
    Form(String),
    /// The external lookup API failed or returned unusable data.
    #[error("upstream lookup failed: {0}")]
    Upstream(String),
    /// Storage or other unexpected failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<ProductFormError> for ServiceError {
    fn from(value: ProductFormError) -> Self {
        ServiceError::Form(value.to_string())
    }
}
