use async_trait::async_trait;
use dnslist_domain::{AddressListEntry, DomainError};
use std::net::Ipv4Addr;

/// Logical operations against the router's management API.
///
/// Implementations must serialize calls internally; callers may invoke these
/// concurrently from several reconciliations and the rule watcher.
#[async_trait]
pub trait RouterApi: Send + Sync {
    /// Destination address-list names of all enabled firewall rules, deduplicated.
    async fn list_rule_address_lists(&self) -> Result<Vec<String>, DomainError>;

    /// Dynamic entry for `address` in `list`, if the router has one.
    async fn find_address_list_entry(
        &self,
        address: Ipv4Addr,
        list: &str,
    ) -> Result<Option<AddressListEntry>, DomainError>;

    /// Creates a dynamic entry. Returns `DomainError::AddressListEntryExists`
    /// when the router already holds one for the same list and address.
    async fn add_address_list_entry(
        &self,
        list: &str,
        address: Ipv4Addr,
        timeout_secs: u32,
    ) -> Result<(), DomainError>;

    async fn set_address_list_timeout(&self, id: &str, timeout_secs: u32)
        -> Result<(), DomainError>;

    async fn flush_dns_cache(&self) -> Result<(), DomainError>;
}
