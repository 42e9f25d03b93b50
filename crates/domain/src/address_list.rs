use std::net::Ipv4Addr;

/// A dynamic address-list record as the router reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressListEntry {
    pub id: String,
    pub list: String,
    pub address: Ipv4Addr,
    /// Remaining lifetime in seconds.
    pub timeout_secs: u32,
}

impl AddressListEntry {
    /// True when the entry already outlives `ttl_secs`; extending it would shorten it.
    pub fn outlives(&self, ttl_secs: u32) -> bool {
        self.timeout_secs >= ttl_secs
    }
}
