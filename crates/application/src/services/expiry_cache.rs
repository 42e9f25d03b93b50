use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub list: Arc<str>,
    pub address: Ipv4Addr,
}

impl CacheKey {
    pub fn new(list: Arc<str>, address: Ipv4Addr) -> Self {
        Self { list, address }
    }
}

/// Remembers which `(list, address)` pairs were reconciled recently so that
/// repeated answers do not hit the router again. The router stays the
/// authority; an entry here only means "no need to ask yet".
///
/// Entries are never removed while still valid; `purge` drops expired ones.
#[derive(Debug, Default)]
pub struct ExpiryCache {
    entries: RwLock<HashMap<CacheKey, Instant>>,
}

impl ExpiryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn exists(&self, key: &CacheKey) -> bool {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .is_some_and(|expires_at| Instant::now() < *expires_at)
    }

    pub async fn set(&self, key: CacheKey, ttl_secs: u32) {
        let expires_at = Instant::now() + Duration::from_secs(u64::from(ttl_secs));
        self.entries.write().await.insert(key, expires_at);
    }

    /// Removes expired entries and returns how many were dropped.
    pub async fn purge(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, expires_at| now < *expires_at);
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(list: &str, last_octet: u8) -> CacheKey {
        CacheKey::new(Arc::from(list), Ipv4Addr::new(10, 0, 0, last_octet))
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_valid_until_expiry() {
        let cache = ExpiryCache::new();
        cache.set(key("example.com", 1), 10).await;

        assert!(cache.exists(&key("example.com", 1)).await);

        tokio::time::advance(Duration::from_secs(9)).await;
        assert!(cache.exists(&key("example.com", 1)).await);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(!cache.exists(&key("example.com", 1)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_is_never_trusted() {
        let cache = ExpiryCache::new();
        cache.set(key("example.com", 1), 0).await;
        assert!(!cache.exists(&key("example.com", 1)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_distinct_per_list_and_address() {
        let cache = ExpiryCache::new();
        cache.set(key("example.com", 1), 60).await;

        assert!(!cache.exists(&key("example.com", 2)).await);
        assert!(!cache.exists(&key("other.com", 1)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_only_removes_expired() {
        let cache = ExpiryCache::new();
        cache.set(key("short.com", 1), 5).await;
        cache.set(key("long.com", 1), 60).await;

        assert_eq!(cache.purge().await, 0);

        tokio::time::advance(Duration::from_secs(6)).await;

        assert_eq!(cache.purge().await, 1);
        assert_eq!(cache.len().await, 1);
        assert!(cache.exists(&key("long.com", 1)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_refreshes_expiry() {
        let cache = ExpiryCache::new();
        cache.set(key("example.com", 1), 5).await;

        tokio::time::advance(Duration::from_secs(4)).await;
        cache.set(key("example.com", 1), 5).await;
        tokio::time::advance(Duration::from_secs(4)).await;

        assert!(cache.exists(&key("example.com", 1)).await);
    }
}
