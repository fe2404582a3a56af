//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::try_get_parsed,
    domain::{
        products::records::{ProductCategory, ProductRecord, ProductUuid},
        receptions::records::ReceptionUuid,
    },
};

const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const DELETE_LAST_PRODUCT_SQL: &str = include_str!("sql/delete_last_product.sql");
const GET_PRODUCTS_SQL: &str = include_str!("sql/get_products.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        reception: ReceptionUuid,
        category: ProductCategory,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(ProductUuid::new().into_uuid())
            .bind(reception.into_uuid())
            .bind(category.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_last_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        reception: ReceptionUuid,
    ) -> Result<Option<ProductUuid>, sqlx::Error> {
        let deleted: Option<Uuid> = query_scalar(DELETE_LAST_PRODUCT_SQL)
            .bind(reception.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(deleted.map(ProductUuid::from_uuid))
    }

    pub(crate) async fn get_products(
        &self,
        pool: &PgPool,
        receptions: &[ReceptionUuid],
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = receptions.iter().map(|uuid| uuid.into_uuid()).collect();

        query_as::<Postgres, ProductRecord>(GET_PRODUCTS_SQL)
            .bind(uuids)
            .fetch_all(pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            reception_uuid: ReceptionUuid::from_uuid(row.try_get("reception_uuid")?),
            category: try_get_parsed(row, "category")?,
            added_at: row.try_get::<SqlxTimestamp, _>("added_at")?.to_jiff(),
        })
    }
}
