//! List Pickup Points Handler

use std::collections::HashMap;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use pvz_app::domain::{
    listing::data::{
        DEFAULT_PAGE, DEFAULT_PAGE_LIMIT, ListingQuery, OpenedAtRange, PickupPointListing,
    },
    pickup_points::records::PickupPointUuid,
    receptions::records::ReceptionUuid,
};

use crate::{
    extensions::*,
    pickup_points::errors::listing_status_error,
    responses::{PickupPointResponse, ProductResponse, ReceptionResponse},
};

/// Reception with its products
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReceptionWithProducts {
    pub reception: ReceptionResponse,
    pub products: Vec<ProductResponse>,
}

/// Pickup point with its receptions on the requested page
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PickupPointWithReceptions {
    pub pvz: PickupPointResponse,
    pub receptions: Vec<ReceptionWithProducts>,
}

/// Nest a flat listing page: pickup points in the order their first reception appears,
/// receptions in page order, products in the order they were added.
fn group(listing: PickupPointListing) -> Vec<PickupPointWithReceptions> {
    let mut products: HashMap<ReceptionUuid, Vec<ProductResponse>> = HashMap::new();

    for product in listing.products {
        products
            .entry(product.reception_uuid)
            .or_default()
            .push(product.into());
    }

    let mut pickup_points: HashMap<PickupPointUuid, PickupPointResponse> = listing
        .pickup_points
        .into_iter()
        .map(|pickup_point| (pickup_point.uuid, pickup_point.into()))
        .collect();

    let mut groups: Vec<PickupPointWithReceptions> = Vec::new();
    let mut positions: HashMap<PickupPointUuid, usize> = HashMap::new();

    for reception in listing.receptions {
        let pickup_point_uuid = reception.pickup_point_uuid;

        let position = match positions.get(&pickup_point_uuid) {
            Some(position) => *position,
            None => {
                // Pickup point missing from the page snapshot.
                let Some(pvz) = pickup_points.remove(&pickup_point_uuid) else {
                    continue;
                };

                let position = groups.len();

                groups.push(PickupPointWithReceptions {
                    pvz,
                    receptions: Vec::new(),
                });
                positions.insert(pickup_point_uuid, position);

                position
            }
        };

        let products = products.remove(&reception.uuid).unwrap_or_default();

        if let Some(group) = groups.get_mut(position) {
            group.receptions.push(ReceptionWithProducts {
                reception: reception.into(),
                products,
            });
        }
    }

    groups
}

/// List Pickup Points Handler
///
/// Query parameters: `startDate` and `endDate` (RFC 3339, optional, half-open range over
/// reception opening times), `page` (from 1) and `limit` (1 to 30).
#[endpoint(
    tags("pvz"),
    summary = "List Pickup Points",
    responses(
        (status_code = StatusCode::OK, description = "Pickup points with their receptions"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Operation timed out"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Vec<PickupPointWithReceptions>>, StatusError> {
    let state = depot.state_or_500()?;

    let query = ListingQuery {
        range: OpenedAtRange {
            from: req.timestamp_query("startDate")?,
            to: req.timestamp_query("endDate")?,
        },
        page: req.number_query("page", DEFAULT_PAGE)?,
        limit: req.number_query("limit", DEFAULT_PAGE_LIMIT)?,
    };

    let listing = state
        .app
        .listing
        .list_pickup_points(query)
        .await
        .map_err(listing_status_error)?;

    Ok(Json(group(listing)))
}
