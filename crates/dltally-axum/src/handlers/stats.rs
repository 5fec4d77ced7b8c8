//! Stats handlers - download count and recent log entries.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use dltally_core::{CoreError, DownloadLogEntry};
use serde::{Deserialize, Serialize};

use crate::error::HttpError;
use crate::state::AppState;

/// Response body of `GET /api/stats`.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub downloads: u64,
    pub resource_path: String,
}

/// Report the counter value.
pub async fn get(State(state): State<AppState>) -> Result<Json<StatsResponse>, HttpError> {
    let recorder = Arc::clone(&state.recorder);
    let downloads = tokio::task::spawn_blocking(move || recorder.count()).await??;

    Ok(Json(StatsResponse {
        downloads,
        resource_path: state.recorder.resource_path().to_string(),
    }))
}

/// Default number of entries returned by `GET /api/downloads`.
pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// Upper bound on `limit`.
pub const MAX_RECENT_LIMIT: usize = 500;

/// Query of `GET /api/downloads`.
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

/// Most recent log entries, newest first.
pub async fn recent(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<DownloadLogEntry>>, HttpError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .min(MAX_RECENT_LIMIT);
    let log = Arc::clone(&state.stores.log);
    let mut entries = tokio::task::spawn_blocking(move || log.read_recent(limit))
        .await?
        .map_err(CoreError::from)?;

    entries.reverse();
    Ok(Json(entries))
}
