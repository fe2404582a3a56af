//! Pickup points service errors.

use thiserror::Error;

use crate::store::StoreFailure;

#[derive(Debug, Error)]
pub enum PickupPointsServiceError {
    #[error("operation deadline exceeded")]
    DeadlineExceeded,

    #[error(transparent)]
    Store(#[from] StoreFailure),
}

impl PickupPointsServiceError {
    /// Whether this error is an infrastructure fault rather than an expected outcome.
    #[must_use]
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::DeadlineExceeded | Self::Store(_))
    }
}
