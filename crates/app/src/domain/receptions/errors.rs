//! Receptions service errors.

use thiserror::Error;

use crate::store::StoreFailure;

#[derive(Debug, Error)]
pub enum ReceptionsServiceError {
    #[error("reception already in progress")]
    AlreadyExists,

    #[error("no reception in progress")]
    NotFound,

    #[error("pickup point not found")]
    PickupPointNotFound,

    #[error("operation deadline exceeded")]
    DeadlineExceeded,

    #[error(transparent)]
    Store(#[from] StoreFailure),
}

impl ReceptionsServiceError {
    /// Whether this error is an infrastructure fault rather than an expected outcome.
    #[must_use]
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::DeadlineExceeded | Self::Store(_))
    }
}
