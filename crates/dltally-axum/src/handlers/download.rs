//! Download handler - log, count, redirect.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::client_addr::ClientAddress;
use crate::error::HttpError;
use crate::state::AppState;

/// Record the download and redirect to the artifact with `302 Found`.
///
/// Storage runs on the blocking pool. A disconnecting client does not
/// cancel it, so a started record always finishes.
pub async fn download(
    State(state): State<AppState>,
    client: ClientAddress,
) -> Result<Response, HttpError> {
    let recorder = Arc::clone(&state.recorder);
    let outcome =
        tokio::task::spawn_blocking(move || recorder.record(client.as_str())).await??;

    tracing::debug!(
        target: "dltally.download",
        redirect_to = %outcome.redirect_to,
        "Redirecting"
    );

    Ok((StatusCode::FOUND, [(header::LOCATION, state.location.clone())]).into_response())
}
