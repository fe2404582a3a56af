//! Add Product Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pvz_app::domain::products::records::ProductCategory;

use crate::{extensions::*, products::errors::into_status_error, responses::ProductResponse};

/// Add Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddProductRequest {
    /// One of `electronics`, `clothes`, `shoes`
    #[serde(rename = "type")]
    pub category: String,

    pub pvz_id: Uuid,
}

/// Add Product Handler
///
/// Adds a product to the pickup point's reception in progress.
#[endpoint(
    tags("products"),
    summary = "Add Product",
    responses(
        (status_code = StatusCode::CREATED, description = "Product added"),
        (status_code = StatusCode::NOT_FOUND, description = "No reception in progress"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Operation timed out"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let request = json.into_inner();

    let category = request
        .category
        .parse::<ProductCategory>()
        .or_400("Invalid product type")?;

    let product = state
        .app
        .products
        .add_product(request.pvz_id.into(), category)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}
