//! Business operation counters.

use mockall::automock;

/// Counters incremented by the services once an operation has committed.
#[automock]
pub trait OperationMetrics: Send + Sync {
    fn pickup_point_registered(&self);

    fn reception_created(&self);

    fn product_added(&self);
}

/// Metrics sink that discards every observation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl OperationMetrics for NoopMetrics {
    fn pickup_point_registered(&self) {}

    fn reception_created(&self) {}

    fn product_added(&self) {}
}
