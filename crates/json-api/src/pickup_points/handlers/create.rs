//! Register Pickup Point Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use pvz_app::domain::pickup_points::records::City;

use crate::{
    extensions::*,
    pickup_points::errors::into_status_error,
    responses::PickupPointResponse,
};

/// Register Pickup Point Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterPickupPointRequest {
    /// One of `Москва`, `Санкт-Петербург`, `Казань`
    pub city: String,
}

/// Register Pickup Point Handler
#[endpoint(
    tags("pvz"),
    summary = "Register Pickup Point",
    responses(
        (status_code = StatusCode::CREATED, description = "Pickup point registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unsupported city"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Operation timed out"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterPickupPointRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PickupPointResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let city = json
        .into_inner()
        .city
        .parse::<City>()
        .or_400("Invalid city")?;

    let pickup_point = state
        .app
        .pickup_points
        .register_pickup_point(city)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(pickup_point.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use pvz_app::{
        domain::pickup_points::{PickupPointsServiceError, records::PickupPointUuid},
        store::{StoreError, StoreFailure},
    };

    use crate::test_helpers::{MockApp, make_pickup_point};

    use super::*;

    fn make_service(app: MockApp) -> Service {
        app.into_service(Router::with_path("pvz").post(handler))
    }

    #[tokio::test]
    async fn test_register_pickup_point_success() -> TestResult {
        let uuid = PickupPointUuid::new();
        let mut app = MockApp::new();

        app.pickup_points
            .expect_register_pickup_point()
            .once()
            .withf(|city| *city == City::Kazan)
            .return_once(move |city| Ok(make_pickup_point(uuid, city)));

        let mut res = TestClient::post("http://example.com/pvz")
            .json(&json!({ "city": "Казань" }))
            .send(&make_service(app))
            .await;

        let body: PickupPointResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.id, uuid.into_uuid());
        assert_eq!(body.city, "Казань");
        assert_eq!(body.registration_date, "1970-01-01T00:00:00Z");

        Ok(())
    }

    #[tokio::test]
    async fn test_register_pickup_point_unknown_city_returns_400() {
        let mut app = MockApp::new();

        app.pickup_points.expect_register_pickup_point().never();

        let res = TestClient::post("http://example.com/pvz")
            .json(&json!({ "city": "Новосибирск" }))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_register_pickup_point_missing_city_returns_400() {
        let mut app = MockApp::new();

        app.pickup_points.expect_register_pickup_point().never();

        let res = TestClient::post("http://example.com/pvz")
            .json(&json!({}))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_register_pickup_point_store_failure_returns_500() {
        let mut app = MockApp::new();

        app.pickup_points
            .expect_register_pickup_point()
            .once()
            .return_once(|_| {
                Err(PickupPointsServiceError::Store(StoreFailure {
                    context: "insert pickup point",
                    source: StoreError::Canceled,
                }))
            });

        let res = TestClient::post("http://example.com/pvz")
            .json(&json!({ "city": "Москва" }))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
