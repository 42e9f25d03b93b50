use crate::ports::RouterApi;
use crate::use_cases::RefreshWatchPatternsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// Keeps the watched pattern set in line with the router's firewall rules.
///
/// The first refresh happens right away; afterwards one refresh per interval.
/// A failed refresh leaves the previous patterns in place.
pub struct RuleWatcher {
    refresh: Arc<RefreshWatchPatternsUseCase>,
    router: Arc<dyn RouterApi>,
    interval: Duration,
    flush_dns_cache_on_start: bool,
}

impl RuleWatcher {
    pub fn new(refresh: Arc<RefreshWatchPatternsUseCase>, router: Arc<dyn RouterApi>) -> Self {
        Self {
            refresh,
            router,
            interval: DEFAULT_REFRESH_INTERVAL,
            flush_dns_cache_on_start: false,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Clears the router's own DNS cache once when the watcher starts, so
    /// clients of the router resolver re-query through the proxy.
    pub fn with_dns_cache_flush(mut self, enabled: bool) -> Self {
        self.flush_dns_cache_on_start = enabled;
        self
    }

    pub async fn run(&self, shutdown: CancellationToken) {
        info!(
            interval_secs = self.interval.as_secs_f64(),
            "Starting rule watcher"
        );

        if self.flush_dns_cache_on_start {
            match self.router.flush_dns_cache().await {
                Ok(()) => info!("Router DNS cache flushed"),
                Err(e) => warn!(error = %e, "Failed to flush router DNS cache"),
            }
        }

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("RuleWatcher: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    self.refresh_once().await;
                }
            }
        }
    }

    /// Number of installed patterns, or `None` when the refresh failed.
    pub async fn refresh_once(&self) -> Option<usize> {
        match self.refresh.execute().await {
            Ok(count) => Some(count),
            Err(e) => {
                error!(error = %e, "Failed to fetch firewall rules");
                None
            }
        }
    }
}
