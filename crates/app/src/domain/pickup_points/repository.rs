//! Pickup Points Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    database::try_get_parsed,
    domain::pickup_points::records::{City, PickupPointRecord, PickupPointUuid},
};

const CREATE_PICKUP_POINT_SQL: &str = include_str!("sql/create_pickup_point.sql");
const GET_PICKUP_POINTS_SQL: &str = include_str!("sql/get_pickup_points.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPickupPointsRepository;

impl PgPickupPointsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_pickup_point(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        city: City,
    ) -> Result<PickupPointRecord, sqlx::Error> {
        query_as::<Postgres, PickupPointRecord>(CREATE_PICKUP_POINT_SQL)
            .bind(PickupPointUuid::new().into_uuid())
            .bind(city.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_pickup_points(
        &self,
        pool: &PgPool,
        pickup_points: &[PickupPointUuid],
    ) -> Result<Vec<PickupPointRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = pickup_points.iter().map(|uuid| uuid.into_uuid()).collect();

        query_as::<Postgres, PickupPointRecord>(GET_PICKUP_POINTS_SQL)
            .bind(uuids)
            .fetch_all(pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PickupPointRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PickupPointUuid::from_uuid(row.try_get("uuid")?),
            city: try_get_parsed(row, "city")?,
            registered_at: row.try_get::<SqlxTimestamp, _>("registered_at")?.to_jiff(),
        })
    }
}
