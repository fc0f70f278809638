//! HTTP boundary: decodes search parameters and writes the aggregated events.

use crate::aggregator::Aggregator;
use crate::event::Event;
use crate::query::{Query, QueryError, YearMonth};
use axum::extract::{Query as QueryParams, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info, instrument};

pub const SEARCH_PATH: &str = "/api/v1/events/search";

lazy_static! {
    static ref KEYWORD_SEPARATOR: Regex =
        Regex::new(r"[,、，\s]+").expect("Failed to create keyword separator regex");
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub keywords: Option<String>,
    pub address: Option<String>,
    pub month: Option<String>,
}

impl SearchParams {
    pub fn into_query(self) -> Result<Query, QueryError> {
        let keywords = self
            .keywords
            .as_deref()
            .map(|keywords| {
                KEYWORD_SEPARATOR
                    .split(keywords)
                    .filter(|keyword| !keyword.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let address = self
            .address
            .map(|address| address.trim().to_string())
            .unwrap_or_default();

        let month = match self.month.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(month) => Some(month.parse::<YearMonth>()?),
        };

        Ok(Query::new(keywords, address, month))
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    InvalidQuery(#[from] QueryError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            ServerError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn create_router(aggregator: Aggregator) -> Router {
    Router::new()
        .route(SEARCH_PATH, get(search_events))
        .with_state(aggregator)
}

#[instrument(skip_all)]
async fn search_events(
    State(aggregator): State<Aggregator>,
    QueryParams(params): QueryParams<SearchParams>,
) -> Result<Json<Vec<Event>>, ServerError> {
    debug!("Search params: {:?}", params);
    let query = params.into_query()?;

    Ok(Json(aggregator.search_events(&query).await))
}

pub async fn run_server(addr: SocketAddr, aggregator: Aggregator) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;

    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, create_router(aggregator)).await
}
