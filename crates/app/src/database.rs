//! Database connection management

use std::{
    error::Error as StdError,
    fmt::{Debug, Formatter, Result as FmtResult},
    str::FromStr,
    time::Duration,
};

use async_trait::async_trait;
use sqlx::{
    PgPool, Postgres, Row, Transaction,
    migrate::MigrateError,
    postgres::{PgPoolOptions, PgRow},
    query,
};

use crate::{
    domain::{
        listing::data::OpenedAtRange,
        pickup_points::{
            records::{City, PickupPointRecord, PickupPointUuid},
            repository::PgPickupPointsRepository,
        },
        products::{
            records::{ProductCategory, ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
        receptions::{
            records::{ReceptionRecord, ReceptionUuid},
            repository::PgReceptionsRepository,
        },
    },
    locks,
    store::{
        ListingReader, PickupPointLock, PickupPointsRepository, ProductsRepository,
        ReceptionsRepository, StoreError, StoreScope, TransactionRunner,
    },
};

/// SQL used to bound how long a statement in the transaction may wait on a lock.
pub const SET_LOCK_TIMEOUT_SQL: &str = "SELECT set_config('lock_timeout', $1, true)";

/// Connections kept by the pool when no size is configured.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// `PostgreSQL` store.
#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
    lock_timeout: Option<Duration>,
    pickup_points: PgPickupPointsRepository,
    receptions: PgReceptionsRepository,
    products: PgProductsRepository,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            lock_timeout: None,
            pickup_points: PgPickupPointsRepository::new(),
            receptions: PgReceptionsRepository::new(),
            products: PgProductsRepository::new(),
        }
    }

    /// Cancel lock waits inside each transaction after `lock_timeout`.
    #[must_use]
    pub fn with_lock_timeout(mut self, lock_timeout: Duration) -> Self {
        self.lock_timeout = Some(lock_timeout);
        self
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TransactionRunner for Db {
    type Scope = PgScope;

    async fn begin(&self) -> Result<PgScope, StoreError> {
        let mut tx = self.pool.begin().await?;

        if let Some(lock_timeout) = self.lock_timeout {
            query(SET_LOCK_TIMEOUT_SQL)
                .bind(format!("{}ms", lock_timeout.as_millis()))
                .execute(&mut *tx)
                .await?;
        }

        Ok(PgScope {
            tx,
            pickup_points: self.pickup_points.clone(),
            receptions: self.receptions.clone(),
            products: self.products.clone(),
        })
    }
}

#[async_trait]
impl ListingReader for Db {
    async fn search_receptions(
        &self,
        range: OpenedAtRange,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<ReceptionRecord>, StoreError> {
        Ok(self
            .receptions
            .search_receptions(&self.pool, range, offset, limit)
            .await?)
    }

    async fn get_pickup_points(
        &self,
        pickup_points: &[PickupPointUuid],
    ) -> Result<Vec<PickupPointRecord>, StoreError> {
        Ok(self
            .pickup_points
            .get_pickup_points(&self.pool, pickup_points)
            .await?)
    }

    async fn get_products(
        &self,
        receptions: &[ReceptionUuid],
    ) -> Result<Vec<ProductRecord>, StoreError> {
        Ok(self.products.get_products(&self.pool, receptions).await?)
    }
}

/// A `PostgreSQL` transaction. Dropping it without committing rolls it back, which
/// also releases any advisory lock taken through it.
pub struct PgScope {
    tx: Transaction<'static, Postgres>,
    pickup_points: PgPickupPointsRepository,
    receptions: PgReceptionsRepository,
    products: PgProductsRepository,
}

impl Debug for PgScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PgScope").finish_non_exhaustive()
    }
}

#[async_trait]
impl StoreScope for PgScope {
    async fn commit(self) -> Result<(), StoreError> {
        Ok(self.tx.commit().await?)
    }
}

#[async_trait]
impl PickupPointLock for PgScope {
    async fn lock_pickup_point(
        &mut self,
        pickup_point: PickupPointUuid,
    ) -> Result<(), StoreError> {
        Ok(locks::lock_pickup_point(&mut self.tx, pickup_point).await?)
    }
}

#[async_trait]
impl PickupPointsRepository for PgScope {
    async fn create_pickup_point(&mut self, city: City) -> Result<PickupPointRecord, StoreError> {
        Ok(self
            .pickup_points
            .create_pickup_point(&mut self.tx, city)
            .await?)
    }
}

#[async_trait]
impl ReceptionsRepository for PgScope {
    async fn find_in_progress_reception(
        &mut self,
        pickup_point: PickupPointUuid,
    ) -> Result<Option<ReceptionRecord>, StoreError> {
        Ok(self
            .receptions
            .find_in_progress_reception(&mut self.tx, pickup_point)
            .await?)
    }

    async fn create_reception(
        &mut self,
        pickup_point: PickupPointUuid,
    ) -> Result<ReceptionRecord, StoreError> {
        Ok(self
            .receptions
            .create_reception(&mut self.tx, pickup_point)
            .await?)
    }

    async fn close_reception(&mut self, reception: ReceptionUuid) -> Result<u64, StoreError> {
        Ok(self
            .receptions
            .close_reception(&mut self.tx, reception)
            .await?)
    }
}

#[async_trait]
impl ProductsRepository for PgScope {
    async fn create_product(
        &mut self,
        reception: ReceptionUuid,
        category: ProductCategory,
    ) -> Result<ProductRecord, StoreError> {
        Ok(self
            .products
            .create_product(&mut self.tx, reception, category)
            .await?)
    }

    async fn delete_last_product(
        &mut self,
        reception: ReceptionUuid,
    ) -> Result<Option<ProductUuid>, StoreError> {
        Ok(self
            .products
            .delete_last_product(&mut self.tx, reception)
            .await?)
    }
}

/// Decode a `TEXT` column into a domain enum through its [`FromStr`] implementation.
pub(crate) fn try_get_parsed<T>(row: &PgRow, column: &str) -> sqlx::Result<T>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    let raw: String = row.try_get(column)?;

    raw.parse().map_err(|source| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    })
}

/// Convert an unsigned paging value into a `BIGINT` bind parameter.
pub(crate) fn to_bigint(value: u64) -> sqlx::Result<i64> {
    i64::try_from(value).map_err(|source| sqlx::Error::Encode(Box::new(source)))
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    connect_with(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Connect to `PostgreSQL` with a bounded pool.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Apply pending migrations.
///
/// # Errors
///
/// Returns an error when a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
