//! Product Errors

use salvo::http::StatusError;

use pvz_app::domain::products::ProductsServiceError;

use crate::faults;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::ReceptionNotFound => {
            StatusError::not_found().brief("No reception in progress")
        }
        ProductsServiceError::NotFound => {
            StatusError::not_found().brief("No products to remove")
        }
        ProductsServiceError::DeadlineExceeded => faults::deadline_exceeded("product"),
        ProductsServiceError::Store(failure) => faults::store_failure("product", &failure),
    }
}
