use crate::event::Event;
use crate::provider::de::{deserialize_count, deserialize_datetime, deserialize_str};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use tracing::warn;

/// Doorkeeper answers with a bare array of these.
pub type DoorkeeperResponse = Vec<DoorkeeperEntry>;

#[derive(Debug, Deserialize)]
pub struct DoorkeeperEntry {
    pub event: DoorkeeperEvent,
}

#[derive(Debug, Deserialize)]
pub struct DoorkeeperEvent {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_datetime")]
    pub starts_at: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "deserialize_datetime")]
    pub ends_at: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub venue_name: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub address: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub lat: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub long: String,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub ticket_limit: i64,
    #[serde(default, deserialize_with = "deserialize_datetime")]
    pub published_at: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "deserialize_datetime")]
    pub updated_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub group: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub banner: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub public_url: String,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub participants: i64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub waitlisted: i64,
}

impl DoorkeeperEvent {
    /// `None` when the event has no usable start time.
    pub fn to_model(self) -> Option<Event> {
        let Some(starts_at) = self.starts_at else {
            warn!("No start time for '{}' (omitting event)", self.public_url);
            return None;
        };

        Some(Event::new(
            self.title,
            self.address,
            starts_at,
            self.public_url,
            self.ticket_limit,
            self.participants,
        ))
    }
}
