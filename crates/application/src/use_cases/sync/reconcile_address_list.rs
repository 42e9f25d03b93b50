use crate::ports::RouterApi;
use crate::services::{CacheKey, ExpiryCache};
use dnslist_domain::DomainError;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_millis(3),
        }
    }
}

enum Attempt {
    Created,
    Extended { previous_timeout_secs: u32 },
    AlreadySufficient { timeout_secs: u32 },
    /// The router reported a conflict but the entry was gone when looked up.
    Vanished,
}

/// Use case: make sure the router holds a dynamic entry for `address` in
/// `list` that lives at least `ttl_secs`.
///
/// Existing entries are only ever extended. Router failures are logged and
/// reported as "no effect"; they never propagate to DNS resolution.
pub struct ReconcileAddressListUseCase {
    router: Arc<dyn RouterApi>,
    cache: Arc<ExpiryCache>,
    retry: RetryPolicy,
}

impl ReconcileAddressListUseCase {
    pub fn new(router: Arc<dyn RouterApi>, cache: Arc<ExpiryCache>) -> Self {
        Self {
            router,
            cache,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn cache(&self) -> &Arc<ExpiryCache> {
        &self.cache
    }

    /// Returns true when the router now holds a sufficient entry; false on a
    /// cache hit or on failure.
    pub async fn execute(&self, list: &Arc<str>, address: Ipv4Addr, ttl_secs: u32) -> bool {
        let key = CacheKey::new(Arc::clone(list), address);
        if self.cache.exists(&key).await {
            debug!(list = %list, address = %address, "Address-list entry still cached");
            return false;
        }

        let attempts = self.retry.attempts.max(1);
        for attempt in 1..=attempts {
            match self.attempt(list, address, ttl_secs).await {
                Ok(Attempt::Created) => {
                    info!(list = %list, address = %address, timeout = ttl_secs, "Address-list entry created");
                    self.cache.set(key, ttl_secs).await;
                    return true;
                }
                Ok(Attempt::Extended {
                    previous_timeout_secs,
                }) => {
                    info!(
                        list = %list,
                        address = %address,
                        previous = previous_timeout_secs,
                        timeout = ttl_secs,
                        "Address-list entry extended"
                    );
                    self.cache.set(key, ttl_secs).await;
                    return true;
                }
                Ok(Attempt::AlreadySufficient { timeout_secs }) => {
                    debug!(
                        list = %list,
                        address = %address,
                        remaining = timeout_secs,
                        requested = ttl_secs,
                        "Address-list entry already outlives the answer"
                    );
                    self.cache.set(key, ttl_secs).await;
                    return true;
                }
                Ok(Attempt::Vanished) => {
                    debug!(list = %list, address = %address, attempt, "Address-list entry vanished, retrying");
                    if attempt < attempts && !self.retry.delay.is_zero() {
                        tokio::time::sleep(self.retry.delay).await;
                    }
                }
                Err(e) => {
                    error!(list = %list, address = %address, error = %e, "Address-list reconciliation failed");
                    return false;
                }
            }
        }

        error!(
            list = %list,
            address = %address,
            attempts,
            "Address-list reconciliation gave up"
        );
        false
    }

    async fn attempt(
        &self,
        list: &str,
        address: Ipv4Addr,
        ttl_secs: u32,
    ) -> Result<Attempt, DomainError> {
        match self
            .router
            .add_address_list_entry(list, address, ttl_secs)
            .await
        {
            Ok(()) => return Ok(Attempt::Created),
            Err(e) if e.is_conflict() => {}
            Err(e) => return Err(e),
        }

        let Some(entry) = self.router.find_address_list_entry(address, list).await? else {
            return Ok(Attempt::Vanished);
        };

        if entry.outlives(ttl_secs) {
            return Ok(Attempt::AlreadySufficient {
                timeout_secs: entry.timeout_secs,
            });
        }

        self.router
            .set_address_list_timeout(&entry.id, ttl_secs)
            .await?;

        Ok(Attempt::Extended {
            previous_timeout_secs: entry.timeout_secs,
        })
    }
}
