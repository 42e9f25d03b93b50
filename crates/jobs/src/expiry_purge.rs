use dnslist_application::services::ExpiryCache;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Periodically drops expired reconciliation cache entries.
pub struct ExpiryPurgeJob {
    cache: Arc<ExpiryCache>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl ExpiryPurgeJob {
    pub fn new(cache: Arc<ExpiryCache>) -> Self {
        Self {
            cache,
            interval_secs: DEFAULT_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, secs: u64) -> Self {
        self.interval_secs = secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            "Starting expiry cache purge job"
        );

        let job = Arc::clone(&self);
        tokio::spawn(async move {
            let period = Duration::from_secs(job.interval_secs);
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = job.shutdown.cancelled() => {
                        info!("ExpiryPurgeJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let removed = job.cache.purge().await;
                        if removed > 0 {
                            let remaining = job.cache.len().await;
                            debug!(removed, remaining, "Expired cache entries purged");
                        }
                    }
                }
            }
        });
    }
}
