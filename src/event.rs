use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Provider-agnostic event listing returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub title: String,
    pub address: String,
    pub start_date: DateTime<FixedOffset>,
    /// Link to the event page on the provider's site
    pub url: String,
    /// Maximum attendees, 0 when the provider doesn't set one
    pub capacity: i64,
    pub accepted: i64,
}

impl Event {
    pub fn new(
        title: String,
        address: String,
        start_date: DateTime<FixedOffset>,
        url: String,
        capacity: i64,
        accepted: i64,
    ) -> Self {
        Self {
            title,
            address,
            start_date,
            url,
            capacity,
            accepted,
        }
    }
}
