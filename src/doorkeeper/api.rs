use super::dto::{DoorkeeperEvent, DoorkeeperResponse};
use crate::error::ConfigError;
use crate::event::Event;
use crate::provider::{EventProvider, ProviderError, ProviderKind};
use crate::query::{Query, YearMonth};
use chrono::NaiveTime;
use tracing::debug;
use url::Url;

pub const DOORKEEPER_URL: &str = "https://api.doorkeeper.jp/events/";

const KEYWORD_PARAM: &str = "q";
const SINCE_PARAM: &str = "since";
const UNTIL_PARAM: &str = "until";
const UNTIL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Doorkeeper event search.
#[derive(Debug, Clone)]
pub struct DoorkeeperAPI {
    base_url: Url,
}

impl DoorkeeperAPI {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            provider: ProviderKind::Doorkeeper,
            url: base_url.to_string(),
            source,
        })?;

        Ok(Self { base_url })
    }

    /// The first instant of `month` in UTC, e.g. `2024-03-01T00:00:00+0000`.
    ///
    /// Sent as the upper bound next to an empty lower bound. Not an
    /// end-of-month bound.
    fn until(month: YearMonth) -> String {
        month
            .first_day()
            .and_time(NaiveTime::MIN)
            .and_utc()
            .format(UNTIL_FORMAT)
            .to_string()
    }
}

impl EventProvider for DoorkeeperAPI {
    type Record = DoorkeeperEvent;

    fn kind(&self) -> ProviderKind {
        ProviderKind::Doorkeeper
    }

    fn build_url(&self, query: &Query) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut params = url.query_pairs_mut();

            for term in query.search_terms() {
                params.append_pair(KEYWORD_PARAM, term);
            }

            if let Some(month) = query.month {
                params.append_pair(SINCE_PARAM, "");
                params.append_pair(UNTIL_PARAM, &Self::until(month));
            }
        }

        if url.query() == Some("") {
            url.set_query(None);
        }

        url
    }

    fn decode(&self, body: &[u8]) -> Result<Vec<DoorkeeperEvent>, ProviderError> {
        let response = serde_json::from_slice::<DoorkeeperResponse>(body)?;

        debug!("doorkeeper returned {} events", response.len());

        Ok(response.into_iter().map(|entry| entry.event).collect())
    }

    fn normalize(&self, record: DoorkeeperEvent) -> Option<Event> {
        record.to_model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> DoorkeeperAPI {
        DoorkeeperAPI::new(DOORKEEPER_URL).unwrap()
    }

    fn params(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test_log::test]
    fn should_repeat_q_for_each_term() {
        let query = Query::new(vec!["go".into(), "golang".into()], "".into(), None);

        let url = api().build_url(&query);

        assert_eq!(
            params(&url),
            [
                ("q".to_string(), "go".to_string()),
                ("q".to_string(), "golang".to_string()),
            ]
        );
    }

    #[test_log::test]
    fn should_send_address_as_q() {
        let query = Query::new(vec![], "Tokyo".into(), None);

        let url = api().build_url(&query);

        assert_eq!(url.as_str(), "https://api.doorkeeper.jp/events/?q=Tokyo");
    }

    #[test_log::test]
    fn should_send_month_as_empty_since_and_literal_until() {
        let query = Query::new(vec![], "".into(), YearMonth::new(2024, 3));

        let url = api().build_url(&query);

        assert_eq!(
            params(&url),
            [
                ("since".to_string(), "".to_string()),
                ("until".to_string(), "2024-03-01T00:00:00+0000".to_string()),
            ]
        );
        assert_eq!(
            url.as_str(),
            "https://api.doorkeeper.jp/events/?since=&until=2024-03-01T00%3A00%3A00%2B0000"
        );
    }

    #[test_log::test]
    fn when_query_is_empty_should_not_add_parameters() {
        let url = api().build_url(&Query::default());

        assert_eq!(url.as_str(), DOORKEEPER_URL);
    }

    #[test_log::test]
    fn when_base_url_is_malformed_should_fail() {
        assert!(matches!(
            DoorkeeperAPI::new("://missing-scheme"),
            Err(ConfigError::InvalidBaseUrl {
                provider: ProviderKind::Doorkeeper,
                ..
            })
        ));
    }

    #[test_log::test]
    fn should_unwrap_entries_in_order() {
        let body = br#"[
            {"event": {"title": "A", "starts_at": "2024-03-01T10:00:00Z"}},
            {"event": {"title": "B", "starts_at": "2024-03-02T10:00:00Z"}}
        ]"#;

        let records = api().decode(body).unwrap();

        assert_eq!(
            records.iter().map(|r| r.title.as_str()).collect::<Vec<_>>(),
            ["A", "B"]
        );
    }

    #[test_log::test]
    fn should_keep_good_events_next_to_ones_with_nulls() {
        let api = api();
        let body = br#"[
            {"event": {"title": "Good", "starts_at": "2024-03-01T10:00:00Z", "id": 1}},
            {"event": {"title": "Null id", "starts_at": "2024-03-02T10:00:00Z", "id": null, "group": null}},
            {"event": {"title": "No start", "starts_at": null, "id": 3}}
        ]"#;

        let records = api.decode(body).unwrap();
        let events = records
            .into_iter()
            .filter_map(|record| api.normalize(record))
            .collect::<Vec<_>>();

        assert_eq!(
            events.iter().map(|e| e.title.as_str()).collect::<Vec<_>>(),
            ["Good", "Null id"]
        );
    }

    #[test_log::test]
    fn when_body_is_an_object_should_fail_decoding() {
        let err = api().decode(br#"{"events": []}"#).unwrap_err();

        assert!(matches!(err, ProviderError::Decode(_)));
    }
}
