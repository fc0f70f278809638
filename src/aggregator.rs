use crate::config::model::ProvidersConfig;
use crate::connpass::ConnpassAPI;
use crate::doorkeeper::DoorkeeperAPI;
use crate::error::ConfigError;
use crate::event::Event;
use crate::provider::{EventSource, HttpSource, ProviderKind, ProviderOutcome};
use crate::query::Query;
use futures::future;
use reqwest::Client;
use std::sync::Arc;
use tracing::{info, instrument, warn};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// How one provider fared during a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderStatus {
    pub provider: ProviderKind,
    pub event_count: usize,
    /// Cause of the failure, when the provider contributed nothing because of one
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct SearchReport {
    pub events: Vec<Event>,
    pub statuses: Vec<ProviderStatus>,
}

impl SearchReport {
    pub fn failed_providers(&self) -> impl Iterator<Item = ProviderKind> + '_ {
        self.statuses
            .iter()
            .filter(|status| status.error.is_some())
            .map(|status| status.provider)
    }
}

/// Fans a query out to every source and concatenates what comes back.
#[derive(Clone)]
pub struct Aggregator {
    sources: Vec<Arc<dyn EventSource>>,
}

impl Aggregator {
    /// Results keep the order of `sources`.
    pub fn new(sources: Vec<Arc<dyn EventSource>>) -> Self {
        Self { sources }
    }

    /// connpass first, then doorkeeper.
    pub fn from_config(config: &ProvidersConfig) -> Result<Self, ConfigError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let connpass = ConnpassAPI::new(&config.connpass_url)?;
        let doorkeeper = DoorkeeperAPI::new(&config.doorkeeper_url)?;

        Ok(Self::new(vec![
            Arc::new(HttpSource::new(client.clone(), connpass)),
            Arc::new(HttpSource::new(client, doorkeeper)),
        ]))
    }

    pub fn providers(&self) -> Vec<ProviderKind> {
        self.sources.iter().map(|source| source.kind()).collect()
    }

    /// Waits for every source, even when some of them fail.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &Query) -> SearchReport {
        let outcomes =
            future::join_all(self.sources.iter().map(|source| source.search(query))).await;

        let mut events = Vec::new();
        let mut statuses = Vec::with_capacity(outcomes.len());

        for ProviderOutcome { provider, result } in outcomes {
            match result {
                Ok(mut provider_events) => {
                    statuses.push(ProviderStatus {
                        provider,
                        event_count: provider_events.len(),
                        error: None,
                    });
                    events.append(&mut provider_events);
                }
                Err(err) => {
                    warn!("Ignoring {} results: {}", provider, err);
                    statuses.push(ProviderStatus {
                        provider,
                        event_count: 0,
                        error: Some(err.to_string()),
                    });
                }
            }
        }

        info!("Found {} events", events.len());

        SearchReport { events, statuses }
    }

    /// Never fails: a provider that errors just contributes no events.
    pub async fn search_events(&self, query: &Query) -> Vec<Event> {
        self.search(query).await.events
    }
}
