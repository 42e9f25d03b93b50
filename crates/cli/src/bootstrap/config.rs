use dnslist_domain::{CliOverrides, Config};

/// Loads, overrides and validates the configuration. Any problem is fatal.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}
