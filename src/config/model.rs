use crate::connpass::api::CONNPASS_URL;
use crate::doorkeeper::api::DOORKEEPER_URL;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub providers: ProvidersConfig,
    pub loki_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvidersConfig {
    pub connpass_url: String,
    pub doorkeeper_url: String,
    /// Per-call timeout, none by default
    pub request_timeout: Option<Duration>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            connpass_url: CONNPASS_URL.to_string(),
            doorkeeper_url: DOORKEEPER_URL.to_string(),
            request_timeout: None,
        }
    }
}
