//! Close Last Reception Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, receptions::errors::into_status_error, responses::ReceptionResponse};

/// Close Last Reception Handler
///
/// Closes the pickup point's reception in progress.
#[endpoint(
    tags("receptions"),
    summary = "Close Last Reception",
    responses(
        (status_code = StatusCode::OK, description = "Reception closed"),
        (status_code = StatusCode::NOT_FOUND, description = "No reception in progress"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Operation timed out"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    pvz_id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ReceptionResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let reception = state
        .app
        .receptions
        .close_reception(pvz_id.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(reception.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use pvz_app::domain::receptions::{ReceptionsServiceError, records::ReceptionStatus};

    use crate::test_helpers::{
        MockApp, TEST_PICKUP_POINT_UUID, TEST_RECEPTION_UUID, make_reception,
    };

    use super::*;

    fn make_service(app: MockApp) -> Service {
        app.into_service(Router::with_path("pvz/{pvz_id}/close_last_reception").post(handler))
    }

    fn close_url() -> String {
        format!("http://example.com/pvz/{TEST_PICKUP_POINT_UUID}/close_last_reception")
    }

    #[tokio::test]
    async fn test_close_reception_success() -> TestResult {
        let mut app = MockApp::new();

        app.receptions
            .expect_close_reception()
            .once()
            .withf(|pickup_point| *pickup_point == TEST_PICKUP_POINT_UUID)
            .return_once(|pickup_point| {
                Ok(make_reception(
                    TEST_RECEPTION_UUID,
                    pickup_point,
                    ReceptionStatus::Closed,
                ))
            });

        let mut res = TestClient::post(close_url())
            .send(&make_service(app))
            .await;

        let body: ReceptionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.id, TEST_RECEPTION_UUID.into_uuid());
        assert_eq!(body.status, "close");

        Ok(())
    }

    #[tokio::test]
    async fn test_close_reception_without_open_reception_returns_404() {
        let mut app = MockApp::new();

        app.receptions
            .expect_close_reception()
            .once()
            .return_once(|_| Err(ReceptionsServiceError::NotFound));

        let res = TestClient::post(close_url())
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_close_reception_malformed_id_returns_400() {
        let mut app = MockApp::new();

        app.receptions.expect_close_reception().never();

        let res = TestClient::post("http://example.com/pvz/not-a-uuid/close_last_reception")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
