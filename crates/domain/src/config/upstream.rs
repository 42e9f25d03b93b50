use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_DNS_PORT: u16 = 53;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Tried in order; the first successful exchange wins.
    #[serde(default)]
    pub forwarders: Vec<String>,

    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            forwarders: Vec::new(),
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

impl UpstreamConfig {
    /// Resolves forwarders to socket addresses; a bare IP gets port 53.
    pub fn forwarder_addrs(&self) -> Result<Vec<SocketAddr>, ConfigError> {
        self.forwarders
            .iter()
            .map(|raw| parse_forwarder(raw))
            .collect()
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

fn parse_forwarder(raw: &str) -> Result<SocketAddr, ConfigError> {
    let trimmed = raw.trim();
    if let Ok(ip) = trimmed.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_DNS_PORT));
    }
    trimmed
        .parse::<SocketAddr>()
        .map_err(|_| ConfigError::InvalidForwarder(raw.to_string()))
}

fn default_query_timeout_ms() -> u64 {
    2000
}
