//! Store capabilities.
//!
//! The workflow services never talk to a concrete database. They receive a store at
//! construction time and use these narrow capabilities:
//!
//! - [`TransactionRunner`] opens a [`StoreScope`], the transactional execution context.
//!   Committing applies every write made through the scope; dropping it uncommitted
//!   rolls all of them back.
//! - [`PickupPointLock`] acquires the per-pickup-point lock inside a scope. The lock is
//!   held until the scope ends and is never released explicitly.
//! - [`PickupPointsRepository`], [`ReceptionsRepository`] and [`ProductsRepository`]
//!   read and write the three tables inside a scope.
//! - [`ListingReader`] performs lock-free reads outside any scope.
//!
//! [`crate::database::Db`] implements them against `PostgreSQL`,
//! [`crate::memory::MemoryStore`] implements them in memory.

use async_trait::async_trait;
use sqlx::error::{DatabaseError, ErrorKind};
use thiserror::Error;

use crate::domain::{
    listing::data::OpenedAtRange,
    pickup_points::records::{City, PickupPointRecord, PickupPointUuid},
    products::records::{ProductCategory, ProductRecord, ProductUuid},
    receptions::records::{ReceptionRecord, ReceptionUuid},
};

/// `query_canceled`, raised when a statement is cancelled or times out.
const QUERY_CANCELED: &str = "57014";

/// `lock_not_available`, raised when `lock_timeout` elapses.
const LOCK_NOT_AVAILABLE: &str = "55P03";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable")]
    Unavailable(#[source] sqlx::Error),

    #[error("store operation canceled")]
    Canceled,

    #[error("related resource not found")]
    InvalidReference,

    #[error("storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::WorkerCrashed => return Self::Unavailable(error),
            _ => {}
        }

        let Some(database_error) = error.as_database_error() else {
            return Self::Sql(error);
        };

        if matches!(
            database_error.code().as_deref(),
            Some(QUERY_CANCELED | LOCK_NOT_AVAILABLE)
        ) {
            return Self::Canceled;
        }

        match DatabaseError::kind(database_error) {
            ErrorKind::ForeignKeyViolation => Self::InvalidReference,
            _ => Self::Sql(error),
        }
    }
}

/// A store error annotated with the step that produced it.
#[derive(Debug, Error)]
#[error("failed to {context}")]
pub struct StoreFailure {
    pub context: &'static str,

    #[source]
    pub source: StoreError,
}

impl StoreFailure {
    /// Whether the underlying error is a store-side cancellation.
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        matches!(self.source, StoreError::Canceled)
    }
}

pub(crate) trait StoreResultExt<T> {
    /// Wrap a store error with the step it happened in.
    fn context(self, context: &'static str) -> Result<T, StoreFailure>;
}

impl<T> StoreResultExt<T> for Result<T, StoreError> {
    fn context(self, context: &'static str) -> Result<T, StoreFailure> {
        self.map_err(|source| StoreFailure { context, source })
    }
}

/// Opens transactional scopes.
#[async_trait]
pub trait TransactionRunner: Send + Sync {
    type Scope: StoreScope;

    /// Begin a new transactional scope.
    async fn begin(&self) -> Result<Self::Scope, StoreError>;
}

/// Transactional execution context. Dropping an uncommitted scope rolls it back.
#[async_trait]
pub trait StoreScope:
    PickupPointLock + PickupPointsRepository + ReceptionsRepository + ProductsRepository + Send
{
    /// Commit every write performed through this scope and release its lock.
    async fn commit(self) -> Result<(), StoreError>;
}

/// Transaction-scoped mutual exclusion keyed by pickup point.
#[async_trait]
pub trait PickupPointLock: Send {
    /// Block until the pickup point's lock is free, then hold it until the scope ends.
    async fn lock_pickup_point(&mut self, pickup_point: PickupPointUuid)
    -> Result<(), StoreError>;
}

#[async_trait]
pub trait PickupPointsRepository: Send {
    /// Insert a pickup point; the store assigns its uuid and registration time.
    async fn create_pickup_point(&mut self, city: City) -> Result<PickupPointRecord, StoreError>;
}

#[async_trait]
pub trait ReceptionsRepository: Send {
    /// Find the in-progress reception of a pickup point, if any.
    async fn find_in_progress_reception(
        &mut self,
        pickup_point: PickupPointUuid,
    ) -> Result<Option<ReceptionRecord>, StoreError>;

    /// Insert a new in-progress reception; the store assigns uuid and opening time.
    async fn create_reception(
        &mut self,
        pickup_point: PickupPointUuid,
    ) -> Result<ReceptionRecord, StoreError>;

    /// Move an in-progress reception to closed, returning the number of rows changed.
    async fn close_reception(&mut self, reception: ReceptionUuid) -> Result<u64, StoreError>;
}

#[async_trait]
pub trait ProductsRepository: Send {
    /// Insert a product into a reception; the store assigns uuid and time added.
    async fn create_product(
        &mut self,
        reception: ReceptionUuid,
        category: ProductCategory,
    ) -> Result<ProductRecord, StoreError>;

    /// Delete the product with the greatest `(added_at, uuid)` in the reception.
    ///
    /// Returns `None` when the reception has no products.
    async fn delete_last_product(
        &mut self,
        reception: ReceptionUuid,
    ) -> Result<Option<ProductUuid>, StoreError>;
}

/// Lock-free reads used by the listing aggregation.
#[async_trait]
pub trait ListingReader: Send + Sync {
    /// Receptions opened within `range`, ordered by `(opened_at, uuid)`, paged in the store.
    async fn search_receptions(
        &self,
        range: OpenedAtRange,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<ReceptionRecord>, StoreError>;

    async fn get_pickup_points(
        &self,
        pickup_points: &[PickupPointUuid],
    ) -> Result<Vec<PickupPointRecord>, StoreError>;

    async fn get_products(
        &self,
        receptions: &[ReceptionUuid],
    ) -> Result<Vec<ProductRecord>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_exhaustion_is_unavailable() {
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolClosed),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn row_not_found_is_a_plain_sql_error() {
        assert!(matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::Sql(_)
        ));
    }

    #[test]
    fn context_is_rendered() {
        let result: Result<(), StoreError> = Err(StoreError::Canceled);

        let failure = result.context("lock pickup point").err();

        assert_eq!(
            failure.as_ref().map(ToString::to_string).as_deref(),
            Some("failed to lock pickup point")
        );
        assert!(failure.is_some_and(|failure| failure.is_canceled()));
    }
}
