use crate::provider::ProviderKind;
use thiserror::Error;

/// Problems with static configuration. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {provider} base URL '{url}': {source}")]
    InvalidBaseUrl {
        provider: ProviderKind,
        url: String,
        source: url::ParseError,
    },
    #[error("invalid config '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
