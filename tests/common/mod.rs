#![allow(dead_code)]

use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

pub const CONNPASS_BODY: &str = r#"{
  "results_returned": 2,
  "results_start": 1,
  "results_available": 2,
  "events": [
    {
      "event_id": 1,
      "title": "Meetup",
      "address": "Tokyo",
      "started_at": "2024-03-01T18:00:00Z",
      "ended_at": "2024-03-01T21:00:00Z",
      "event_url": "http://x/1",
      "limit": 50,
      "accepted": 30,
      "waiting": 0,
      "series": {"id": 7, "title": "Go Tokyo", "url": "https://gotokyo.connpass.com/"}
    },
    {
      "event_id": 2,
      "title": "Golang LT",
      "address": "Osaka",
      "started_at": "2024-03-15T19:00:00+09:00",
      "event_url": "http://x/2",
      "limit": null,
      "accepted": 4,
      "series": null
    }
  ]
}"#;

pub const DOORKEEPER_BODY: &str = r#"[
  {
    "event": {
      "title": "Go Workshop",
      "id": 99,
      "starts_at": "2024-03-20T01:00:00.000Z",
      "ends_at": "2024-03-20T04:00:00.000Z",
      "venue_name": "Hall",
      "address": "Nagoya",
      "lat": "35.1",
      "long": "136.9",
      "ticket_limit": 20,
      "group": 3,
      "banner": null,
      "public_url": "https://go.doorkeeper.jp/events/99",
      "participants": 18,
      "waitlisted": 2
    }
  }
]"#;

/// A fake upstream that records every query string it receives.
#[derive(Clone)]
pub struct Upstream {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    pub queries: Arc<Mutex<Vec<String>>>,
}

impl Upstream {
    pub fn ok(body: &'static str) -> Self {
        Self::with_status(StatusCode::OK, body)
    }

    pub fn with_status(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body,
            delay: Duration::ZERO,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn received_queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    /// Serves under `path` and returns the full base URL.
    pub async fn serve(&self, path: &str) -> String {
        let app = Router::new()
            .route(path, get(respond))
            .with_state(self.clone());

        let addr = serve(app).await;

        format!("http://{addr}{path}")
    }
}

async fn respond(State(upstream): State<Upstream>, RawQuery(query): RawQuery) -> impl IntoResponse {
    upstream
        .queries
        .lock()
        .unwrap()
        .push(query.unwrap_or_default());

    tokio::time::sleep(upstream.delay).await;

    (
        upstream.status,
        [("content-type", "application/json")],
        upstream.body,
    )
}

pub async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// An address nothing listens on.
pub fn refused_url(path: &str) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{addr}{path}")
}

pub const DOORKEEPER_PARTIAL_BODY: &str = r#"[
  {"event": {"title": "Go Workshop", "id": 99, "starts_at": "2024-03-20T01:00:00.000Z",
             "public_url": "https://go.doorkeeper.jp/events/99", "participants": 18}},
  {"event": {"title": "Draft", "id": null, "starts_at": null, "group": null,
             "public_url": "https://go.doorkeeper.jp/events/100"}}
]"#;
