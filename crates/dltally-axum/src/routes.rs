//! Route definitions and router construction.

use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::bootstrap::AxumContext;
use crate::handlers;
use crate::state::AppState;

/// Build the router.
///
/// When the context carries a static directory, unmatched paths are served
/// from it so a relative redirect target resolves on this server.
/// `GET /api/downloads` is only mounted when the log is exposed.
pub fn create_router(ctx: AxumContext) -> Router {
    let static_dir = ctx.static_dir.clone();
    let download_route = ctx.download_route.clone();
    let expose_log = ctx.expose_log;
    let state: AppState = Arc::new(ctx);

    let router = Router::new()
        .route(&download_route, get(handlers::download::download))
        .route("/health", get(handlers::health))
        .route("/api/stats", get(handlers::stats::get));

    let router = if expose_log {
        router.route("/api/downloads", get(handlers::stats::recent))
    } else {
        router
    };

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.with_state(state).layer(TraceLayer::new_for_http())
}
