//! Receptions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{to_bigint, try_get_parsed},
    domain::{
        listing::data::OpenedAtRange,
        pickup_points::records::PickupPointUuid,
        receptions::records::{ReceptionRecord, ReceptionUuid},
    },
};

const FIND_IN_PROGRESS_RECEPTION_SQL: &str = include_str!("sql/find_in_progress_reception.sql");
const CREATE_RECEPTION_SQL: &str = include_str!("sql/create_reception.sql");
const CLOSE_RECEPTION_SQL: &str = include_str!("sql/close_reception.sql");
const SEARCH_RECEPTIONS_SQL: &str = include_str!("sql/search_receptions.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReceptionsRepository;

impl PgReceptionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_in_progress_reception(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        pickup_point: PickupPointUuid,
    ) -> Result<Option<ReceptionRecord>, sqlx::Error> {
        query_as::<Postgres, ReceptionRecord>(FIND_IN_PROGRESS_RECEPTION_SQL)
            .bind(pickup_point.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_reception(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        pickup_point: PickupPointUuid,
    ) -> Result<ReceptionRecord, sqlx::Error> {
        query_as::<Postgres, ReceptionRecord>(CREATE_RECEPTION_SQL)
            .bind(ReceptionUuid::new().into_uuid())
            .bind(pickup_point.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn close_reception(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        reception: ReceptionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLOSE_RECEPTION_SQL)
            .bind(reception.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn search_receptions(
        &self,
        pool: &PgPool,
        range: OpenedAtRange,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<ReceptionRecord>, sqlx::Error> {
        query_as::<Postgres, ReceptionRecord>(SEARCH_RECEPTIONS_SQL)
            .bind(range.from.map(SqlxTimestamp::from))
            .bind(range.to.map(SqlxTimestamp::from))
            .bind(to_bigint(offset)?)
            .bind(to_bigint(limit)?)
            .fetch_all(pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ReceptionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ReceptionUuid::from_uuid(row.try_get("uuid")?),
            pickup_point_uuid: PickupPointUuid::from_uuid(row.try_get("pickup_point_uuid")?),
            status: try_get_parsed(row, "status")?,
            opened_at: row.try_get::<SqlxTimestamp, _>("opened_at")?.to_jiff(),
        })
    }
}
