//! Listing service errors.

use thiserror::Error;

use crate::store::StoreFailure;

#[derive(Debug, Error)]
pub enum ListingServiceError {
    #[error("invalid page {page} with limit {limit}")]
    InvalidPage { page: u64, limit: u64 },

    #[error("operation deadline exceeded")]
    DeadlineExceeded,

    #[error(transparent)]
    Store(#[from] StoreFailure),
}

impl ListingServiceError {
    /// Whether this error is an infrastructure fault rather than an expected outcome.
    #[must_use]
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::DeadlineExceeded | Self::Store(_))
    }
}
