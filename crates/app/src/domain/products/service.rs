//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        pickup_points::records::PickupPointUuid,
        products::{
            errors::ProductsServiceError,
            records::{ProductCategory, ProductRecord, ProductUuid},
        },
        receptions::records::ReceptionRecord,
        workflow::WorkflowSettings,
    },
    metrics::OperationMetrics,
    store::{
        PickupPointLock, ProductsRepository, ReceptionsRepository, StoreResultExt, StoreScope,
        TransactionRunner,
    },
};

pub type PgProductsService = ProductsWorkflow<Db>;

pub struct ProductsWorkflow<S> {
    store: Arc<S>,
    metrics: Arc<dyn OperationMetrics>,
    settings: WorkflowSettings,
}

impl<S> ProductsWorkflow<S> {
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

/// Lock the pickup point and resolve its reception in progress.
async fn locked_reception<C: StoreScope>(
    scope: &mut C,
    pickup_point: PickupPointUuid,
) -> Result<ReceptionRecord, ProductsServiceError> {
    scope
        .lock_pickup_point(pickup_point)
        .await
        .context("lock pickup point")?;

    scope
        .find_in_progress_reception(pickup_point)
        .await
        .context("find reception in progress")?
        .ok_or(ProductsServiceError::ReceptionNotFound)
}

impl<S: TransactionRunner> ProductsWorkflow<S> {
    async fn insert_product(
        &self,
        pickup_point: PickupPointUuid,
        category: ProductCategory,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut scope = self.store.begin().await.context("begin product scope")?;

        let reception = locked_reception(&mut scope, pickup_point).await?;

        let product = scope
            .create_product(reception.uuid, category)
            .await
            .context("create product")?;

        scope.commit().await.context("commit product")?;

        Ok(product)
    }

    async fn take_last_product(
        &self,
        pickup_point: PickupPointUuid,
    ) -> Result<ProductUuid, ProductsServiceError> {
        let mut scope = self.store.begin().await.context("begin product scope")?;

        let reception = locked_reception(&mut scope, pickup_point).await?;

        let Some(product) = scope
            .delete_last_product(reception.uuid)
            .await
            .context("delete last product")?
        else {
            debug!(reception = %reception.uuid, "reception has no products");

            return Err(ProductsServiceError::NotFound);
        };

        scope.commit().await.context("commit product removal")?;

        Ok(product)
    }
}

#[async_trait]
impl<S: TransactionRunner + 'static> ProductsService for ProductsWorkflow<S> {
    #[tracing::instrument(skip(self))]
    async fn add_product(
        &self,
        pickup_point: PickupPointUuid,
        category: ProductCategory,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let product = timeout(
            self.settings.operation_timeout,
            self.insert_product(pickup_point, category),
        )
        .await
        .map_err(|_elapsed| ProductsServiceError::DeadlineExceeded)??;

        self.metrics.product_added();

        info!(
            product = %product.uuid,
            reception = %product.reception_uuid,
            "product added"
        );

        Ok(product)
    }

    #[tracing::instrument(skip(self))]
    async fn remove_last_product(
        &self,
        pickup_point: PickupPointUuid,
    ) -> Result<ProductUuid, ProductsServiceError> {
        let product = timeout(
            self.settings.operation_timeout,
            self.take_last_product(pickup_point),
        )
        .await
        .map_err(|_elapsed| ProductsServiceError::DeadlineExceeded)??;

        info!(product = %product, "product removed");

        Ok(product)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Adds a product to the pickup point's reception in progress.
    async fn add_product(
        &self,
        pickup_point: PickupPointUuid,
        category: ProductCategory,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Removes the most recently added product of the pickup point's reception in
    /// progress, returning its UUID.
    async fn remove_last_product(
        &self,
        pickup_point: PickupPointUuid,
    ) -> Result<ProductUuid, ProductsServiceError>;
}
