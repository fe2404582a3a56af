//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        listing::{ListingService, ListingWorkflow},
        pickup_points::{PickupPointsService, PickupPointsWorkflow},
        products::{ProductsService, ProductsWorkflow},
        receptions::{ReceptionsService, ReceptionsWorkflow},
        workflow::WorkflowSettings,
    },
    metrics::OperationMetrics,
    store::{ListingReader, TransactionRunner},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

/// Database settings used to build an [`AppContext`].
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,

    /// Apply pending migrations before serving.
    pub migrate: bool,
}

#[derive(Clone)]
pub struct AppContext {
    pub pickup_points: Arc<dyn PickupPointsService>,
    pub receptions: Arc<dyn ReceptionsService>,
    pub products: Arc<dyn ProductsService>,
    pub listing: Arc<dyn ListingService>,
}

impl AppContext {
    /// Build the services over any store.
    #[must_use]
    pub fn from_store<S>(
        store: Arc<S>,
        metrics: Arc<dyn OperationMetrics>,
        settings: WorkflowSettings,
    ) -> Self
    where
        S: TransactionRunner + ListingReader + 'static,
    {
        Self {
            pickup_points: Arc::new(PickupPointsWorkflow::new(
                Arc::clone(&store),
                Arc::clone(&metrics),
                settings,
            )),
            receptions: Arc::new(ReceptionsWorkflow::new(
                Arc::clone(&store),
                Arc::clone(&metrics),
                settings,
            )),
            products: Arc::new(ProductsWorkflow::new(
                Arc::clone(&store),
                metrics,
                settings,
            )),
            listing: Arc::new(ListingWorkflow::new(store, settings)),
        }
    }

    /// Build the services over a Postgres store.
    ///
    /// Lock waits inside a transaction are capped at the operation deadline, so a
    /// timed-out request does not leave its backend queued on the advisory lock.
    #[must_use]
    pub fn from_db(
        db: Db,
        metrics: Arc<dyn OperationMetrics>,
        settings: WorkflowSettings,
    ) -> Self {
        Self::from_store(
            Arc::new(db.with_lock_timeout(settings.operation_timeout)),
            metrics,
            settings,
        )
    }

    /// Build application context from database settings.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying migrations
    /// fails.
    pub async fn from_database(
        database: &DatabaseSettings,
        metrics: Arc<dyn OperationMetrics>,
        settings: WorkflowSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with(&database.url, database.max_connections)
            .await
            .map_err(AppInitError::Database)?;

        if database.migrate {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;
        }

        Ok(Self::from_db(Db::new(pool), metrics, settings))
    }
}
