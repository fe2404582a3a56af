//! Pickup points service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tokio::time::timeout;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        pickup_points::{
            errors::PickupPointsServiceError,
            records::{City, PickupPointRecord},
        },
        workflow::WorkflowSettings,
    },
    metrics::OperationMetrics,
    store::{PickupPointsRepository, StoreResultExt, StoreScope, TransactionRunner},
};

pub type PgPickupPointsService = PickupPointsWorkflow<Db>;

pub struct PickupPointsWorkflow<S> {
    store: Arc<S>,
    metrics: Arc<dyn OperationMetrics>,
    settings: WorkflowSettings,
}

impl<S> PickupPointsWorkflow<S> {
    #[must_use]
    pub fn new(
        store: Arc<S>,
        metrics: Arc<dyn OperationMetrics>,
        settings: WorkflowSettings,
    ) -> Self {
        Self {
            store,
            metrics,
            settings,
        }
    }
}

impl<S: TransactionRunner> PickupPointsWorkflow<S> {
    async fn insert_pickup_point(
        &self,
        city: City,
    ) -> Result<PickupPointRecord, PickupPointsServiceError> {
        let mut scope = self.store.begin().await.context("begin registration")?;

        let pickup_point = scope
            .create_pickup_point(city)
            .await
            .context("create pickup point")?;

        scope.commit().await.context("commit registration")?;

        Ok(pickup_point)
    }
}

#[async_trait]
impl<S: TransactionRunner + 'static> PickupPointsService for PickupPointsWorkflow<S> {
    #[tracing::instrument(skip(self))]
    async fn register_pickup_point(
        &self,
        city: City,
    ) -> Result<PickupPointRecord, PickupPointsServiceError> {
        let pickup_point = timeout(self.settings.operation_timeout, self.insert_pickup_point(city))
            .await
            .map_err(|_elapsed| PickupPointsServiceError::DeadlineExceeded)??;

        self.metrics.pickup_point_registered();

        info!(pickup_point = %pickup_point.uuid, "pickup point registered");

        Ok(pickup_point)
    }
}

#[automock]
#[async_trait]
pub trait PickupPointsService: Send + Sync {
    /// Registers a new pickup point in one of the supported cities.
    async fn register_pickup_point(
        &self,
        city: City,
    ) -> Result<PickupPointRecord, PickupPointsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn register_pickup_point_returns_city_and_uuid() -> TestResult {
        let ctx = TestContext::new().await;

        let pickup_point = ctx.pickup_points.register_pickup_point(City::Kazan).await?;

        assert_eq!(pickup_point.city, City::Kazan);

        let stored: String = sqlx::query_scalar("SELECT city FROM pickup_points WHERE uuid = $1")
            .bind(pickup_point.uuid.into_uuid())
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(stored, "Казань");

        Ok(())
    }

    #[tokio::test]
    async fn registration_increments_counter_after_commit() -> TestResult {
        let ctx = TestContext::new().await;

        let mut metrics = crate::metrics::MockOperationMetrics::new();
        metrics.expect_pickup_point_registered().times(1).return_const(());

        let service = PickupPointsWorkflow::new(
            Arc::new(ctx.store.clone()),
            Arc::new(metrics),
            WorkflowSettings::default(),
        );

        service.register_pickup_point(City::Moscow).await?;

        Ok(())
    }
}
