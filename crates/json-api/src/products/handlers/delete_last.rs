//! Delete Last Product Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, products::errors::into_status_error};

/// Delete Last Product Handler
///
/// Removes the most recently added product of the pickup point's reception in progress.
#[endpoint(
    tags("products"),
    summary = "Delete Last Product",
    responses(
        (status_code = StatusCode::OK, description = "Product removed"),
        (status_code = StatusCode::NOT_FOUND, description = "No reception in progress or no products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Operation timed out"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    pvz_id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;

    state
        .app
        .products
        .remove_last_product(pvz_id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;

    use pvz_app::domain::products::{ProductsServiceError, records::ProductUuid};

    use crate::test_helpers::{MockApp, TEST_PICKUP_POINT_UUID};

    use super::*;

    fn make_service(app: MockApp) -> Service {
        app.into_service(Router::with_path("pvz/{pvz_id}/delete_last_product").post(handler))
    }

    fn delete_url() -> String {
        format!("http://example.com/pvz/{TEST_PICKUP_POINT_UUID}/delete_last_product")
    }

    #[tokio::test]
    async fn test_delete_last_product_success() {
        let mut app = MockApp::new();

        app.products
            .expect_remove_last_product()
            .once()
            .withf(|pickup_point| *pickup_point == TEST_PICKUP_POINT_UUID)
            .return_once(|_| Ok(ProductUuid::new()));

        let res = TestClient::post(delete_url())
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_delete_last_product_empty_reception_returns_404() {
        let mut app = MockApp::new();

        app.products
            .expect_remove_last_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::post(delete_url())
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_delete_last_product_without_reception_returns_404() {
        let mut app = MockApp::new();

        app.products
            .expect_remove_last_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::ReceptionNotFound));

        let res = TestClient::post(delete_url())
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
