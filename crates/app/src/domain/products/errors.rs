//! Products service errors.

use thiserror::Error;

use crate::store::StoreFailure;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("no reception in progress")]
    ReceptionNotFound,

    #[error("product not found")]
    NotFound,

    #[error("operation deadline exceeded")]
    DeadlineExceeded,

    #[error(transparent)]
    Store(#[from] StoreFailure),
}

impl ProductsServiceError {
    /// Whether this error is an infrastructure fault rather than an expected outcome.
    #[must_use]
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::DeadlineExceeded | Self::Store(_))
    }
}
