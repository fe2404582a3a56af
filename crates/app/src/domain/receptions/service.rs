//! Receptions service.
//!
//! Both operations run inside a single store scope that holds the pickup point's lock
//! from the first read until commit, so the "at most one reception in progress" check
//! and the write that depends on it cannot interleave with another request for the same
//! pickup point.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        pickup_points::records::PickupPointUuid,
        receptions::{
            errors::ReceptionsServiceError,
            records::{ReceptionRecord, ReceptionStatus},
        },
        workflow::WorkflowSettings,
    },
    metrics::OperationMetrics,
    store::{
        PickupPointLock, ReceptionsRepository, StoreError, StoreFailure, StoreResultExt,
        StoreScope, TransactionRunner,
    },
};

pub type PgReceptionsService = ReceptionsWorkflow<Db>;

pub struct ReceptionsWorkflow<S> {
    store: Arc<S>,
    metrics: Arc<dyn OperationMetrics>,
    settings: WorkflowSettings,
}

impl<S> ReceptionsWorkflow<S> {
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

impl<S: TransactionRunner> ReceptionsWorkflow<S> {
    async fn open_reception(
        &self,
        pickup_point: PickupPointUuid,
    ) -> Result<ReceptionRecord, ReceptionsServiceError> {
        let mut scope = self.store.begin().await.context("begin reception scope")?;

        scope
            .lock_pickup_point(pickup_point)
            .await
            .context("lock pickup point")?;

        let existing = scope
            .find_in_progress_reception(pickup_point)
            .await
            .context("find reception in progress")?;

        if let Some(existing) = existing {
            debug!(reception = %existing.uuid, "reception already in progress");

            return Err(ReceptionsServiceError::AlreadyExists);
        }

        let reception = match scope.create_reception(pickup_point).await {
            Ok(reception) => reception,
            Err(StoreError::InvalidReference) => {
                return Err(ReceptionsServiceError::PickupPointNotFound);
            }
            Err(source) => {
                return Err(StoreFailure {
                    context: "create reception",
                    source,
                }
                .into());
            }
        };

        scope.commit().await.context("commit reception")?;

        Ok(reception)
    }

    async fn finish_reception(
        &self,
        pickup_point: PickupPointUuid,
    ) -> Result<ReceptionRecord, ReceptionsServiceError> {
        let mut scope = self.store.begin().await.context("begin reception scope")?;

        scope
            .lock_pickup_point(pickup_point)
            .await
            .context("lock pickup point")?;

        let mut reception = scope
            .find_in_progress_reception(pickup_point)
            .await
            .context("find reception in progress")?
            .ok_or(ReceptionsServiceError::NotFound)?;

        let rows_affected = scope
            .close_reception(reception.uuid)
            .await
            .context("close reception")?;

        if rows_affected == 0 {
            return Err(ReceptionsServiceError::NotFound);
        }

        scope.commit().await.context("commit reception")?;

        reception.status = ReceptionStatus::Closed;

        Ok(reception)
    }
}

#[async_trait]
impl<S: TransactionRunner + 'static> ReceptionsService for ReceptionsWorkflow<S> {
    #[tracing::instrument(skip(self))]
    async fn create_reception(
        &self,
        pickup_point: PickupPointUuid,
    ) -> Result<ReceptionRecord, ReceptionsServiceError> {
        let reception = timeout(
            self.settings.operation_timeout,
            self.open_reception(pickup_point),
        )
        .await
        .map_err(|_elapsed| ReceptionsServiceError::DeadlineExceeded)??;

        self.metrics.reception_created();

        info!(reception = %reception.uuid, "reception opened");

        Ok(reception)
    }

    #[tracing::instrument(skip(self))]
    async fn close_reception(
        &self,
        pickup_point: PickupPointUuid,
    ) -> Result<ReceptionRecord, ReceptionsServiceError> {
        let reception = timeout(
            self.settings.operation_timeout,
            self.finish_reception(pickup_point),
        )
        .await
        .map_err(|_elapsed| ReceptionsServiceError::DeadlineExceeded)??;

        info!(reception = %reception.uuid, "reception closed");

        Ok(reception)
    }
}

#[automock]
#[async_trait]
pub trait ReceptionsService: Send + Sync {
    /// Opens a new reception for the pickup point.
    ///
    /// Fails with [`ReceptionsServiceError::AlreadyExists`] while another reception is
    /// still in progress there.
    async fn create_reception(
        &self,
        pickup_point: PickupPointUuid,
    ) -> Result<ReceptionRecord, ReceptionsServiceError>;

    /// Closes the pickup point's reception in progress and returns it.
    async fn close_reception(
        &self,
        pickup_point: PickupPointUuid,
    ) -> Result<ReceptionRecord, ReceptionsServiceError>;
}
