use crate::event::Event;
use crate::provider::de::{deserialize_count, deserialize_datetime, deserialize_str};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct ConnpassResponse {
    #[serde(default, deserialize_with = "deserialize_count")]
    pub results_returned: i64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub results_start: i64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub results_available: i64,
    #[serde(default)]
    pub events: Vec<ConnpassEvent>,
}

#[derive(Debug, Deserialize)]
pub struct ConnpassEvent {
    #[serde(default)]
    pub event_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub catch: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub event_url: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub event_type: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub hash_tag: String,
    #[serde(default, deserialize_with = "deserialize_datetime")]
    pub started_at: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "deserialize_datetime")]
    pub ended_at: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "deserialize_datetime")]
    pub updated_at: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub limit: i64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub accepted: i64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub waiting: i64,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub address: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub place: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub lat: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub lon: String,
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub owner_nickname: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub owner_display_name: String,
    pub series: Option<ConnpassSeries>,
}

#[derive(Debug, Deserialize)]
pub struct ConnpassSeries {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub url: String,
}

impl ConnpassEvent {
    /// `None` when the event has no usable start time.
    pub fn to_model(self) -> Option<Event> {
        let Some(started_at) = self.started_at else {
            warn!("No start time for '{}' (omitting event)", self.event_url);
            return None;
        };

        Some(Event::new(
            self.title,
            self.address,
            started_at,
            self.event_url,
            self.limit,
            self.accepted,
        ))
    }
}
