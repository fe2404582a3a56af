//! Response bodies shared by the handlers.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pvz_app::domain::{
    pickup_points::records::PickupPointRecord, products::records::ProductRecord,
    receptions::records::ReceptionRecord,
};

/// Pickup Point
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PickupPointResponse {
    pub id: Uuid,

    /// RFC 3339 registration time
    pub registration_date: String,

    pub city: String,
}

impl From<PickupPointRecord> for PickupPointResponse {
    fn from(record: PickupPointRecord) -> Self {
        Self {
            id: record.uuid.into_uuid(),
            registration_date: record.registered_at.to_string(),
            city: record.city.as_str().to_string(),
        }
    }
}

/// Reception
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReceptionResponse {
    pub id: Uuid,

    /// RFC 3339 opening time
    pub date_time: String,

    pub pvz_id: Uuid,

    /// `in_progress` or `close`
    pub status: String,
}

impl From<ReceptionRecord> for ReceptionResponse {
    fn from(record: ReceptionRecord) -> Self {
        Self {
            id: record.uuid.into_uuid(),
            date_time: record.opened_at.to_string(),
            pvz_id: record.pickup_point_uuid.into_uuid(),
            status: record.status.as_str().to_string(),
        }
    }
}

/// Product
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    pub id: Uuid,

    /// RFC 3339 time the product was added
    pub date_time: String,

    #[serde(rename = "type")]
    pub category: String,

    pub reception_id: Uuid,
}

impl From<ProductRecord> for ProductResponse {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: record.uuid.into_uuid(),
            date_time: record.added_at.to_string(),
            category: record.category.as_str().to_string(),
            reception_id: record.reception_uuid.into_uuid(),
        }
    }
}
