use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("All upstream servers are unreachable")]
    TransportAllServersUnreachable,

    #[error("Address-list entry already exists")]
    AddressListEntryExists,

    #[error("Router API error: {0}")]
    RouterApi(String),

    #[error("Router authentication failed: {0}")]
    RouterAuth(String),

    #[error("Router transport error: {0}")]
    RouterTransport(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Conflict answers are part of normal reconciliation flow.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AddressListEntryExists)
    }
}
