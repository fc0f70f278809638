use super::dto::{ConnpassEvent, ConnpassResponse};
use crate::error::ConfigError;
use crate::event::Event;
use crate::provider::{EventProvider, ProviderError, ProviderKind};
use crate::query::Query;
use tracing::debug;
use url::Url;

pub const CONNPASS_URL: &str = "https://connpass.com/api/v1/event/";

const KEYWORD_PARAM: &str = "keyword";
const MONTH_PARAM: &str = "ym";

/// connpass event search.
///
/// connpass has no location filter, so the address goes out as one more
/// `keyword`.
#[derive(Debug, Clone)]
pub struct ConnpassAPI {
    base_url: Url,
}

impl ConnpassAPI {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            provider: ProviderKind::Connpass,
            url: base_url.to_string(),
            source,
        })?;

        Ok(Self { base_url })
    }
}

impl EventProvider for ConnpassAPI {
    type Record = ConnpassEvent;

    fn kind(&self) -> ProviderKind {
        ProviderKind::Connpass
    }

    fn build_url(&self, query: &Query) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut params = url.query_pairs_mut();

            for term in query.search_terms() {
                params.append_pair(KEYWORD_PARAM, term);
            }

            if let Some(month) = query.month {
                params.append_pair(
                    MONTH_PARAM,
                    &month.first_day().format("%Y%m").to_string(),
                );
            }
        }

        // No parameters at all would otherwise leave a dangling '?'
        if url.query() == Some("") {
            url.set_query(None);
        }

        url
    }

    fn decode(&self, body: &[u8]) -> Result<Vec<ConnpassEvent>, ProviderError> {
        let response = serde_json::from_slice::<ConnpassResponse>(body)?;

        debug!(
            "connpass returned {} of {} available events",
            response.results_returned, response.results_available
        );

        Ok(response.events)
    }

    fn normalize(&self, record: ConnpassEvent) -> Option<Event> {
        record.to_model()
    }
}
