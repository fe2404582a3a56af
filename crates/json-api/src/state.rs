//! Shared request state.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use pvz_app::context::AppContext;

/// Injected into every request's depot.
pub(crate) struct State {
    pub(crate) app: AppContext,
    started_at: Instant,
}

impl State {
    /// Wrap the services for injection; uptime is measured from this call.
    #[must_use]
    pub(crate) fn shared(app: AppContext) -> Arc<Self> {
        Arc::new(Self {
            app,
            started_at: Instant::now(),
        })
    }

    /// Time since the state was created.
    pub(crate) fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
