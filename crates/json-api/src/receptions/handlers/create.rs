//! Create Reception Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, receptions::errors::into_status_error, responses::ReceptionResponse};

/// Create Reception Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateReceptionRequest {
    pub pvz_id: Uuid,
}

/// Create Reception Handler
#[endpoint(
    tags("receptions"),
    summary = "Open Reception",
    responses(
        (status_code = StatusCode::CREATED, description = "Reception opened"),
        (status_code = StatusCode::CONFLICT, description = "Reception already in progress"),
        (status_code = StatusCode::NOT_FOUND, description = "Pickup point not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Operation timed out"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateReceptionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReceptionResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let reception = state
        .app
        .receptions
        .create_reception(json.into_inner().pvz_id.into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(reception.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use pvz_app::domain::receptions::{ReceptionsServiceError, records::ReceptionStatus};

    use crate::test_helpers::{
        MockApp, TEST_PICKUP_POINT_UUID, TEST_RECEPTION_UUID, make_reception,
    };

    use super::*;

    fn make_service(app: MockApp) -> Service {
        app.into_service(Router::with_path("receptions").post(handler))
    }

    #[tokio::test]
    async fn test_create_reception_success() -> TestResult {
        let mut app = MockApp::new();

        app.receptions
            .expect_create_reception()
            .once()
            .withf(|pickup_point| *pickup_point == TEST_PICKUP_POINT_UUID)
            .return_once(|pickup_point| {
                Ok(make_reception(
                    TEST_RECEPTION_UUID,
                    pickup_point,
                    ReceptionStatus::InProgress,
                ))
            });

        let mut res = TestClient::post("http://example.com/receptions")
            .json(&json!({ "pvzId": TEST_PICKUP_POINT_UUID.into_uuid() }))
            .send(&make_service(app))
            .await;

        let body: ReceptionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.id, TEST_RECEPTION_UUID.into_uuid());
        assert_eq!(body.pvz_id, TEST_PICKUP_POINT_UUID.into_uuid());
        assert_eq!(body.status, "in_progress");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_reception_in_progress_returns_409() {
        let mut app = MockApp::new();

        app.receptions
            .expect_create_reception()
            .once()
            .return_once(|_| Err(ReceptionsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/receptions")
            .json(&json!({ "pvzId": TEST_PICKUP_POINT_UUID.into_uuid() }))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }

    #[tokio::test]
    async fn test_create_reception_unknown_pickup_point_returns_404() {
        let mut app = MockApp::new();

        app.receptions
            .expect_create_reception()
            .once()
            .return_once(|_| Err(ReceptionsServiceError::PickupPointNotFound));

        let res = TestClient::post("http://example.com/receptions")
            .json(&json!({ "pvzId": TEST_PICKUP_POINT_UUID.into_uuid() }))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_create_reception_malformed_id_returns_400() {
        let mut app = MockApp::new();

        app.receptions.expect_create_reception().never();

        let res = TestClient::post("http://example.com/receptions")
            .json(&json!({ "pvzId": "not-a-uuid" }))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_create_reception_deadline_returns_503() {
        let mut app = MockApp::new();

        app.receptions
            .expect_create_reception()
            .once()
            .return_once(|_| Err(ReceptionsServiceError::DeadlineExceeded));

        let res = TestClient::post("http://example.com/receptions")
            .json(&json!({ "pvzId": TEST_PICKUP_POINT_UUID.into_uuid() }))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));
    }
}
