use crate::config::model::{Config, ProvidersConfig, DEFAULT_BIND_ADDR};
use crate::error::ConfigError;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(|name| env::var(name).ok())
}

/// Same as [`load_config`], reading variables through `lookup`.
pub fn load_config_from<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = ProvidersConfig::default();

    let bind_addr = load_socket_addr_config(&lookup, "EVENTHUB_BIND_ADDR")?;
    let connpass_url = lookup("EVENTHUB_CONNPASS_URL").unwrap_or(defaults.connpass_url);
    let doorkeeper_url = lookup("EVENTHUB_DOORKEEPER_URL").unwrap_or(defaults.doorkeeper_url);
    let request_timeout = load_secs_config(&lookup, "EVENTHUB_REQUEST_TIMEOUT_SECS")?;
    let loki_url = lookup("LOKI_URL").filter(|url| !url.is_empty());

    Ok(Config {
        bind_addr,
        providers: ProvidersConfig {
            connpass_url,
            doorkeeper_url,
            request_timeout,
        },
        loki_url,
    })
}

fn load_socket_addr_config<F>(lookup: &F, name: &str) -> Result<SocketAddr, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

    value.parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        reason: format!("'{}' is not a socket address", value),
    })
}

fn load_secs_config<F>(lookup: &F, name: &str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(name) else {
        return Ok(None);
    };

    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            reason: "expected a positive number of seconds".to_string(),
        }),
    }
}
