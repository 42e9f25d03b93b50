use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning of the address-list synchronization.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Added to every observed DNS TTL before it becomes the entry timeout.
    #[serde(default)]
    pub grace_ttl_secs: u32,

    /// Pause before releasing an answer once a router update took effect.
    #[serde(default = "default_propagation_delay_ms")]
    pub propagation_delay_ms: u64,

    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Upper bound on how long an answer is held back for hooks. Must cover
    /// the router retry budget, see `Config::router_retry_budget`.
    #[serde(default = "default_hook_timeout_ms")]
    pub hook_timeout_ms: u64,

    #[serde(default = "default_purge_interval_secs")]
    pub purge_interval_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            grace_ttl_secs: 0,
            propagation_delay_ms: default_propagation_delay_ms(),
            refresh_interval_secs: default_refresh_interval_secs(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            hook_timeout_ms: default_hook_timeout_ms(),
            purge_interval_secs: default_purge_interval_secs(),
        }
    }
}

impl SyncConfig {
    pub fn propagation_delay(&self) -> Duration {
        Duration::from_millis(self.propagation_delay_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn hook_timeout(&self) -> Duration {
        Duration::from_millis(self.hook_timeout_ms)
    }
}

fn default_propagation_delay_ms() -> u64 {
    15
}

fn default_refresh_interval_secs() -> u64 {
    5
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    3
}

fn default_hook_timeout_ms() -> u64 {
    30_000
}

fn default_purge_interval_secs() -> u64 {
    60
}
