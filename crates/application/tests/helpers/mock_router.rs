use async_trait::async_trait;
use dnslist_application::ports::RouterApi;
use dnslist_domain::{AddressListEntry, DomainError};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

type EntryKey = (String, Ipv4Addr);

/// In-memory router. Entries behave like RouterOS dynamic address-list
/// records: adding a duplicate is a conflict, timeouts are plain numbers.
#[derive(Clone)]
pub struct MockRouterApi {
    entries: Arc<RwLock<HashMap<EntryKey, AddressListEntry>>>,
    rule_lists: Arc<RwLock<Vec<String>>>,
    failure: Arc<RwLock<Option<DomainError>>>,
    hide_entries: Arc<AtomicBool>,
    next_id: Arc<AtomicU64>,
    add_calls: Arc<AtomicU64>,
    find_calls: Arc<AtomicU64>,
    set_timeout_calls: Arc<AtomicU64>,
    list_calls: Arc<AtomicU64>,
    flush_calls: Arc<AtomicU64>,
}

impl MockRouterApi {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            rule_lists: Arc::new(RwLock::new(Vec::new())),
            failure: Arc::new(RwLock::new(None)),
            hide_entries: Arc::new(AtomicBool::new(false)),
            next_id: Arc::new(AtomicU64::new(1)),
            add_calls: Arc::new(AtomicU64::new(0)),
            find_calls: Arc::new(AtomicU64::new(0)),
            set_timeout_calls: Arc::new(AtomicU64::new(0)),
            list_calls: Arc::new(AtomicU64::new(0)),
            flush_calls: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn with_rule_lists(lists: &[&str]) -> Self {
        let router = Self::new();
        router.set_rule_lists(lists).await;
        router
    }

    pub async fn set_rule_lists(&self, lists: &[&str]) {
        *self.rule_lists.write().await = lists.iter().map(|l| l.to_string()).collect();
    }

    pub async fn seed_entry(&self, list: &str, address: &str, timeout_secs: u32) {
        let address: Ipv4Addr = address.parse().unwrap();
        let id = format!("*{:X}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.entries.write().await.insert(
            (list.to_string(), address),
            AddressListEntry {
                id,
                list: list.to_string(),
                address,
                timeout_secs,
            },
        );
    }

    pub async fn entry(&self, list: &str, address: &str) -> Option<AddressListEntry> {
        let address: Ipv4Addr = address.parse().unwrap();
        self.entries
            .read()
            .await
            .get(&(list.to_string(), address))
            .cloned()
    }

    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Every call fails with `error` until cleared.
    pub async fn set_failure(&self, error: Option<DomainError>) {
        *self.failure.write().await = error;
    }

    /// Lookups return nothing even though adds still conflict.
    pub fn set_hide_entries(&self, hide: bool) {
        self.hide_entries.store(hide, Ordering::SeqCst);
    }

    pub fn add_calls(&self) -> u64 {
        self.add_calls.load(Ordering::SeqCst)
    }

    pub fn find_calls(&self) -> u64 {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn set_timeout_calls(&self) -> u64 {
        self.set_timeout_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> u64 {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn flush_calls(&self) -> u64 {
        self.flush_calls.load(Ordering::SeqCst)
    }

    pub fn mutation_calls(&self) -> u64 {
        self.add_calls() + self.set_timeout_calls()
    }

    async fn check_failure(&self) -> Result<(), DomainError> {
        match self.failure.read().await.as_ref() {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

impl Default for MockRouterApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RouterApi for MockRouterApi {
    async fn list_rule_address_lists(&self) -> Result<Vec<String>, DomainError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure().await?;
        Ok(self.rule_lists.read().await.clone())
    }

    async fn find_address_list_entry(
        &self,
        address: Ipv4Addr,
        list: &str,
    ) -> Result<Option<AddressListEntry>, DomainError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure().await?;
        if self.hide_entries.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self
            .entries
            .read()
            .await
            .get(&(list.to_string(), address))
            .cloned())
    }

    async fn add_address_list_entry(
        &self,
        list: &str,
        address: Ipv4Addr,
        timeout_secs: u32,
    ) -> Result<(), DomainError> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure().await?;

        let mut entries = self.entries.write().await;
        let key = (list.to_string(), address);
        if entries.contains_key(&key) {
            return Err(DomainError::AddressListEntryExists);
        }

        let id = format!("*{:X}", self.next_id.fetch_add(1, Ordering::SeqCst));
        entries.insert(
            key,
            AddressListEntry {
                id,
                list: list.to_string(),
                address,
                timeout_secs,
            },
        );
        Ok(())
    }

    async fn set_address_list_timeout(
        &self,
        id: &str,
        timeout_secs: u32,
    ) -> Result<(), DomainError> {
        self.set_timeout_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure().await?;

        let mut entries = self.entries.write().await;
        match entries.values_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.timeout_secs = timeout_secs;
                Ok(())
            }
            None => Err(DomainError::RouterApi(format!("no such item ({id})"))),
        }
    }

    async fn flush_dns_cache(&self) -> Result<(), DomainError> {
        self.flush_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure().await
    }
}
