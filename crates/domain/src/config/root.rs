use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::router::RouterConfig;
use super::server::ServerConfig;
use super::sync::SyncConfig;
use super::upstream::UpstreamConfig;

const LOCAL_CONFIG_PATH: &str = "dnslist.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/dnslist/config.toml";

/// add, find and set-timeout in the worst case.
const ROUTER_CALLS_PER_ATTEMPT: u64 = 3;

/// Main configuration structure for dnslist
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream forwarders
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// RouterOS management API
    #[serde(default)]
    pub router: RouterConfig,

    /// Address-list synchronization tuning
    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dnslist.toml in current directory
    /// 3. /etc/dnslist/config.toml
    /// 4. Default configuration
    ///
    /// Command-line overrides are applied on top in every case.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(forwarders) = overrides.forwarders {
            self.upstream.forwarders = forwarders;
        }
        if let Some(address) = overrides.router_address {
            self.router.address = address;
        }
        if let Some(username) = overrides.router_username {
            self.router.username = username;
        }
        if let Some(password) = overrides.router_password {
            self.router.password = password;
        }
        if overrides.insecure_tls {
            self.router.insecure_tls = true;
        }
        if let Some(grace) = overrides.grace_ttl_secs {
            self.sync.grace_ttl_secs = grace;
        }
        if let Some(delay) = overrides.propagation_delay_ms {
            self.sync.propagation_delay_ms = delay;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration. Any error here is fatal at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.upstream.forwarders.is_empty() {
            return Err(ConfigError::Validation(
                "No upstream forwarders configured".to_string(),
            ));
        }
        self.upstream.forwarder_addrs()?;

        if self.router.host().is_none() {
            return Err(ConfigError::Validation(format!(
                "Router address must be an http(s) URL, got '{}'",
                self.router.address
            )));
        }
        if self.router.username.is_empty() {
            return Err(ConfigError::Validation(
                "Router username is not set".to_string(),
            ));
        }
        if self.router.password.is_empty() {
            return Err(ConfigError::Validation(
                "Router password is not set".to_string(),
            ));
        }

        if self.sync.refresh_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "Refresh interval must be at least 1 second".to_string(),
            ));
        }
        if self.sync.retry_attempts == 0 {
            return Err(ConfigError::Validation(
                "Retry attempts must be at least 1".to_string(),
            ));
        }

        if self.sync.hook_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Hook timeout must be at least 1 millisecond".to_string(),
            ));
        }
        let budget_ms = self.router_retry_budget().as_millis();
        if u128::from(self.sync.hook_timeout_ms) < budget_ms {
            return Err(ConfigError::Validation(format!(
                "Hook timeout of {}ms is shorter than the router retry budget of {}ms",
                self.sync.hook_timeout_ms, budget_ms
            )));
        }

        Ok(())
    }

    /// Longest a single reconciliation may take when every router call runs
    /// into its request timeout.
    pub fn router_retry_budget(&self) -> Duration {
        let attempts = u64::from(self.sync.retry_attempts);
        let per_attempt_ms = self
            .router
            .request_timeout_secs
            .saturating_mul(1000)
            .saturating_mul(ROUTER_CALLS_PER_ATTEMPT)
            .saturating_add(self.sync.retry_delay_ms);
        Duration::from_millis(per_attempt_ms.saturating_mul(attempts))
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub forwarders: Option<Vec<String>>,
    pub router_address: Option<String>,
    pub router_username: Option<String>,
    pub router_password: Option<String>,
    pub insecure_tls: bool,
    pub grace_ttl_secs: Option<u32>,
    pub propagation_delay_ms: Option<u64>,
    pub log_level: Option<String>,
}
