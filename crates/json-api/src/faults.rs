//! Mapping of infrastructure faults to HTTP errors.
//!
//! Business outcomes are mapped per domain; everything that reaches this module is
//! logged here and answered with an opaque status.

use salvo::http::StatusError;
use tracing::error;

use pvz_app::store::StoreFailure;

/// A store failure: logged with its source and answered with 500.
pub(crate) fn store_failure(operation: &str, failure: &StoreFailure) -> StatusError {
    error!(
        operation,
        canceled = failure.is_canceled(),
        "{failure}: {}",
        failure.source
    );

    StatusError::internal_server_error()
}

/// The operation ran out of time, usually waiting on a busy pickup point.
pub(crate) fn deadline_exceeded(operation: &str) -> StatusError {
    error!(operation, "operation deadline exceeded");

    StatusError::service_unavailable().brief("Pickup point is busy, try again")
}
