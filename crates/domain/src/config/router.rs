use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Clone, Deserialize, Serialize)]
pub struct RouterConfig {
    /// Base URL of the RouterOS REST API, e.g. `https://192.168.88.1`.
    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Skip TLS certificate verification.
    #[serde(default)]
    pub insecure_tls: bool,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_true")]
    pub flush_dns_cache_on_start: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            username: String::new(),
            password: String::new(),
            insecure_tls: false,
            request_timeout_secs: default_request_timeout_secs(),
            flush_dns_cache_on_start: true,
        }
    }
}

impl RouterConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Host part of `address`, or `None` when the scheme is not http(s).
    pub fn host(&self) -> Option<&str> {
        let rest = self
            .address
            .strip_prefix("https://")
            .or_else(|| self.address.strip_prefix("http://"))?;
        let host = rest.split('/').next().unwrap_or_default();
        (!host.is_empty()).then_some(host)
    }
}

impl fmt::Debug for RouterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterConfig")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("insecure_tls", &self.insecure_tls)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("flush_dns_cache_on_start", &self.flush_dns_cache_on_start)
            .finish()
    }
}

fn default_request_timeout_secs() -> u64 {
    3
}

fn default_true() -> bool {
    true
}
