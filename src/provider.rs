//! The seam between the aggregator and the upstream event directories.
//!
//! An [`EventProvider`] knows one upstream's wire format: how to turn a
//! [`Query`] into a request URL, how to decode the response body and how to map
//! each native record onto an [`Event`]. [`HttpSource`] performs the actual
//! call for any provider and never fails: every problem is captured in the
//! returned [`ProviderOutcome`].

pub mod de;

use crate::event::Event;
use crate::query::Query;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

#[derive(strum::Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum ProviderKind {
    Connpass,
    Doorkeeper,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream answered with status {0}")]
    Status(StatusCode),
    #[error("response parse failed: {0}")]
    Decode(#[from] serde_json::Error),
}

pub trait EventProvider: Send + Sync {
    type Record;

    fn kind(&self) -> ProviderKind;

    fn build_url(&self, query: &Query) -> Url;

    fn decode(&self, body: &[u8]) -> Result<Vec<Self::Record>, ProviderError>;

    /// `None` drops the record, e.g. when it has no start time.
    fn normalize(&self, record: Self::Record) -> Option<Event>;
}

/// What a single provider contributed to one search.
#[derive(Debug)]
pub struct ProviderOutcome {
    pub provider: ProviderKind,
    pub result: Result<Vec<Event>, ProviderError>,
}

impl ProviderOutcome {
    pub fn success(provider: ProviderKind, events: Vec<Event>) -> Self {
        Self {
            provider,
            result: Ok(events),
        }
    }

    pub fn failure(provider: ProviderKind, error: ProviderError) -> Self {
        Self {
            provider,
            result: Err(error),
        }
    }
}

/// Something the aggregator can search.
///
/// Implementations report failures through [`ProviderOutcome`] instead of
/// returning them, so one unreachable upstream never aborts a search.
#[async_trait]
pub trait EventSource: Send + Sync {
    fn kind(&self) -> ProviderKind;

    async fn search(&self, query: &Query) -> ProviderOutcome;
}

/// Runs an [`EventProvider`] over HTTP.
pub struct HttpSource<P> {
    client: Client,
    provider: P,
}

impl<P: EventProvider> HttpSource<P> {
    pub fn new(client: Client, provider: P) -> Self {
        Self { client, provider }
    }

    async fn fetch(&self, url: Url) -> Result<Vec<Event>, ProviderError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status));
        }

        let body = response.bytes().await?;
        let records = self.provider.decode(&body)?;

        Ok(records
            .into_iter()
            .filter_map(|record| self.provider.normalize(record))
            .collect())
    }
}

#[async_trait]
impl<P> EventSource for HttpSource<P>
where
    P: EventProvider,
    P::Record: Send,
{
    fn kind(&self) -> ProviderKind {
        self.provider.kind()
    }

    #[instrument(skip_all, fields(provider = %self.provider.kind()))]
    async fn search(&self, query: &Query) -> ProviderOutcome {
        let url = self.provider.build_url(query);
        debug!("Requesting {}", url);

        match self.fetch(url).await {
            Ok(events) => {
                debug!("Got {} events", events.len());
                ProviderOutcome::success(self.provider.kind(), events)
            }
            Err(err) => ProviderOutcome::failure(self.provider.kind(), err),
        }
    }
}
