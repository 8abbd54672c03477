//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::config::Config;
use crate::error::Result;
use crate::models::{DataQuery, HealthResponse, QueryKey, RecordSet, StatsResponse};
use crate::service::DataService;
use crate::upstream::UpstreamSource;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-backed data service
    pub service: Arc<DataService>,
}

impl AppState {
    /// Creates a new AppState around the given service.
    pub fn new(service: DataService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Creates a new AppState from configuration and an upstream source.
    pub fn from_config(config: &Config, upstream: Arc<dyn UpstreamSource>) -> Self {
        Self::new(DataService::from_config(upstream, config))
    }
}

/// Handler for GET /data?interval=...
///
/// Returns the normalized statistics rows for the requested interval. The
/// selector is validated before the cache or the upstream is touched.
pub async fn data_handler(
    State(state): State<AppState>,
    Query(query): Query<DataQuery>,
) -> Result<Json<RecordSet>> {
    let interval = query.interval()?;
    let records = state.service.records(QueryKey::Statistics(interval)).await?;

    Ok(Json(records))
}

/// Handler for GET /calendars
///
/// Returns the normalized calendar rows.
pub async fn calendars_handler(State(state): State<AppState>) -> Result<Json<RecordSet>> {
    let records = state.service.records(QueryKey::Calendars).await?;

    Ok(Json(records))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.service.stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
