//! Pickup Point Errors

use salvo::http::StatusError;

use pvz_app::domain::{listing::ListingServiceError, pickup_points::PickupPointsServiceError};

use crate::faults;

pub(crate) fn into_status_error(error: PickupPointsServiceError) -> StatusError {
    match error {
        PickupPointsServiceError::DeadlineExceeded => {
            faults::deadline_exceeded("register pickup point")
        }
        PickupPointsServiceError::Store(failure) => {
            faults::store_failure("register pickup point", &failure)
        }
    }
}

pub(crate) fn listing_status_error(error: ListingServiceError) -> StatusError {
    match error {
        ListingServiceError::InvalidPage { page, limit } => StatusError::bad_request()
            .brief(format!("Invalid page {page} with limit {limit}")),
        ListingServiceError::DeadlineExceeded => faults::deadline_exceeded("list pickup points"),
        ListingServiceError::Store(failure) => {
            faults::store_failure("list pickup points", &failure)
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn invalid_page_is_a_bad_request() {
        let error = listing_status_error(ListingServiceError::InvalidPage { page: 0, limit: 10 });

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert_eq!(error.brief, "Invalid page 0 with limit 10");
    }

    #[test]
    fn deadline_is_service_unavailable() {
        let error = into_status_error(PickupPointsServiceError::DeadlineExceeded);

        assert_eq!(error.code, StatusCode::SERVICE_UNAVAILABLE);
    }
}
