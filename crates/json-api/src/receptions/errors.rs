//! Reception Errors

use salvo::http::StatusError;

use pvz_app::domain::receptions::ReceptionsServiceError;

use crate::faults;

pub(crate) fn into_status_error(error: ReceptionsServiceError) -> StatusError {
    match error {
        ReceptionsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Reception already in progress")
        }
        ReceptionsServiceError::NotFound => {
            StatusError::not_found().brief("No reception in progress")
        }
        ReceptionsServiceError::PickupPointNotFound => {
            StatusError::not_found().brief("Pickup point not found")
        }
        ReceptionsServiceError::DeadlineExceeded => faults::deadline_exceeded("reception"),
        ReceptionsServiceError::Store(failure) => faults::store_failure("reception", &failure),
    }
}
