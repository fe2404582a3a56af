//! Workflow Settings

use std::time::Duration;

/// Deadline applied to a workflow operation when none is configured.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_millis(5000);

/// Settings shared by the per-pickup-point workflow services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowSettings {
    /// Upper bound on a whole operation, lock wait included. When it elapses the
    /// operation's scope is dropped and rolled back.
    pub operation_timeout: Duration,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }
}

impl WorkflowSettings {
    #[must_use]
    pub fn with_operation_timeout(operation_timeout: Duration) -> Self {
        Self { operation_timeout }
    }
}
