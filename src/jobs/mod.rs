use chrono::Utc;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::info;

use crate::context::AppContext;

/// Job scheduler for background tasks
///
/// Lazy eviction on lookup is the correctness mechanism; the periodic sweep
/// only bounds memory held by keys nobody looks up again.
pub struct JobScheduler {
    context: AppContext,
}

impl JobScheduler {
    pub fn new(context: AppContext) -> Self {
        Self { context }
    }

    /// Start all background jobs
    pub fn start(self: Arc<Self>) {
        let sweep_secs = self.context.config.directory.sweep_interval_secs;
        if sweep_secs == 0 {
            info!("Expiry sweep disabled");
            return;
        }

        info!("Starting background job scheduler");
        tokio::spawn(Self::expired_provider_sweep_job(Arc::clone(&self), sweep_secs));
    }

    /// Drop expired provider entries on a fixed cadence
    async fn expired_provider_sweep_job(scheduler: Arc<Self>, every_secs: u64) {
        let mut interval = interval(Duration::from_secs(every_secs));

        loop {
            interval.tick().await;

            let removed = scheduler.context.directory.sweep_expired(Utc::now());
            if removed > 0 {
                info!("Swept {} expired provider entries", removed);
            }
        }
    }
}
