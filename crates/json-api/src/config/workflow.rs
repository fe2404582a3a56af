//! Workflow Config

use std::time::Duration;

use clap::Args;
use pvz_app::domain::workflow::WorkflowSettings;

/// Pickup point workflow settings.
#[derive(Debug, Args)]
pub struct WorkflowConfig {
    /// Deadline for a single pickup point operation, lock wait included
    #[arg(long, env = "OPERATION_TIMEOUT_MS", default_value_t = 5_000_u64)]
    pub operation_timeout_ms: u64,
}

impl WorkflowConfig {
    #[must_use]
    pub fn settings(&self) -> WorkflowSettings {
        WorkflowSettings::with_operation_timeout(Duration::from_millis(self.operation_timeout_ms))
    }
}
