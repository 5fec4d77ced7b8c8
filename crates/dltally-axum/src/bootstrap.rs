//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the Axum web adapter. All concrete implementations are instantiated here.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use dltally_core::{
    DirectoryCreationStrategy, DownloadRecorder, Stores, SystemClock, TallySettings, data_root,
};
use dltally_store::StoreFactory;
use tokio_util::sync::CancellationToken;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default route of the download endpoint.
pub const DEFAULT_DOWNLOAD_ROUTE: &str = "/download";

/// Routes the router always serves.
pub const RESERVED_ROUTES: [&str; 3] = ["/health", "/api/stats", "/api/downloads"];

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub bind: IpAddr,
    /// Port for the HTTP server.
    pub port: u16,
    /// Route that records a download and redirects.
    pub download_route: String,
    /// Directory relative file names are resolved against. `None` = current directory.
    pub data_dir: Option<PathBuf>,
    /// Optional directory served as a static fallback (where the artifact lives).
    pub static_dir: Option<PathBuf>,
    /// Take the client address from `X-Forwarded-For` / `X-Real-IP`.
    pub trust_proxy_headers: bool,
    /// Mount `GET /api/downloads`, which lists client addresses from the log.
    pub expose_log: bool,
    /// Log, counter and redirect settings.
    pub tally: TallySettings,
}

impl ServerConfig {
    /// Create config with default paths.
    pub fn with_defaults() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            download_route: DEFAULT_DOWNLOAD_ROUTE.to_string(),
            data_dir: None,
            static_dir: None,
            trust_proxy_headers: false,
            expose_log: false,
            tally: TallySettings::default(),
        }
    }

    /// Set the directory data files are resolved against.
    #[must_use]
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(path.into());
        self
    }

    /// Set the static directory served as a fallback.
    #[must_use]
    pub fn with_static_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(path.into());
        self
    }

    /// Replace the tally settings.
    #[must_use]
    pub fn with_tally(mut self, tally: TallySettings) -> Self {
        self.tally = tally;
        self
    }

    /// Trust reverse-proxy headers for the client address.
    #[must_use]
    pub const fn with_trusted_proxy_headers(mut self, trust: bool) -> Self {
        self.trust_proxy_headers = trust;
        self
    }

    /// Serve the recent-downloads listing.
    #[must_use]
    pub const fn with_exposed_log(mut self, expose: bool) -> Self {
        self.expose_log = expose;
        self
    }

    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

/// Application context for the Axum adapter.
///
/// This struct holds all initialized services for the web server.
pub struct AxumContext {
    /// Records downloads against the log and counter.
    pub recorder: Arc<DownloadRecorder>,
    /// Storage handles, for read-only views.
    pub stores: Stores,
    /// Pre-validated `Location` header value.
    pub location: HeaderValue,
    /// Route of the download endpoint.
    pub download_route: String,
    /// Static fallback directory.
    pub static_dir: Option<PathBuf>,
    /// Whether proxy headers override the peer address.
    pub trust_proxy_headers: bool,
    /// Whether `GET /api/downloads` is mounted.
    pub expose_log: bool,
}

/// Check the download route is a static path axum can mount.
///
/// Captures (`{id}`), wildcards and the `:param` / `*rest` syntax axum 0.8
/// panics on are rejected, as are empty segments and the built-in routes.
pub fn validate_download_route(route: &str) -> Result<()> {
    let Some(rest) = route.strip_prefix('/') else {
        anyhow::bail!("Download route must start with '/': {route}");
    };
    if RESERVED_ROUTES.contains(&route) {
        anyhow::bail!("Download route collides with a built-in route: {route}");
    }
    if rest.is_empty() {
        return Ok(());
    }
    for segment in rest.split('/') {
        if segment.is_empty() {
            anyhow::bail!("Download route has an empty segment: {route}");
        }
        if segment.starts_with(':') || segment.starts_with('*') {
            anyhow::bail!("Download route cannot contain parameters or wildcards: {route}");
        }
        if segment.contains(['{', '}']) {
            anyhow::bail!("Download route cannot contain '{{' or '}}': {route}");
        }
    }
    Ok(())
}

/// Bootstrap the Axum server with all services.
pub fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    config.tally.validate()?;

    validate_download_route(&config.download_route)?;

    let location = HeaderValue::from_str(&config.tally.resource_path).with_context(|| {
        format!(
            "Resource path is not a valid Location header: {}",
            config.tally.resource_path
        )
    })?;

    let root = data_root(config.data_dir.as_deref())?;
    let stores =
        StoreFactory::build_stores(&config.tally, &root, DirectoryCreationStrategy::AutoCreate)?;

    tracing::info!(
        target: "dltally.paths",
        data_root = %root.display(),
        log_file = %config.tally.log_file.display(),
        counter_file = %config.tally.counter_file.display(),
        resource_path = %config.tally.resource_path,
        timezone = %config.tally.timezone,
        increment = %config.tally.increment,
        failure_policy = %config.tally.failure_policy,
        "Axum bootstrap resolved paths"
    );

    let recorder = Arc::new(DownloadRecorder::new(
        Arc::clone(&stores.log),
        Arc::clone(&stores.counter),
        Arc::new(SystemClock),
        &config.tally,
    )?);

    Ok(AxumContext {
        recorder,
        stores,
        location,
        download_route: config.download_route.clone(),
        static_dir: config.static_dir.clone(),
        trust_proxy_headers: config.trust_proxy_headers,
        expose_log: config.expose_log,
    })
}

/// Start the web server and run until `cancel` fires.
pub async fn start_server(config: ServerConfig, cancel: CancellationToken) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap(&config)?;
    if let Some(ref static_dir) = ctx.static_dir {
        info!("Serving static assets from: {}", static_dir.display());
    }
    let route = ctx.download_route.clone();
    let app = crate::routes::create_router(ctx);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("dltally listening on http://{addr}{route}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(cancel.cancelled_owned())
    .await?;

    info!("dltally server shut down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_bind_all_interfaces() {
        let config = ServerConfig::with_defaults();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.download_route, DEFAULT_DOWNLOAD_ROUTE);
        assert!(!config.expose_log);
    }

    #[test]
    fn bootstrap_creates_data_directories() {
        let dir = tempdir().unwrap();
        let mut config = ServerConfig::with_defaults().with_data_dir(dir.path());
        config.tally.counter_file = "state/counter.txt".into();

        let ctx = bootstrap(&config).unwrap();
        assert!(dir.path().join("state").is_dir());
        assert_eq!(ctx.location, "Download/ODYSSEUS-EduCOSMOS-master.zip");
    }

    #[test]
    fn route_without_leading_slash_is_rejected() {
        let dir = tempdir().unwrap();
        let mut config = ServerConfig::with_defaults().with_data_dir(dir.path());
        config.download_route = "download".to_string();
        assert!(bootstrap(&config).is_err());
    }

    #[test]
    fn reserved_route_is_rejected() {
        let dir = tempdir().unwrap();
        let mut config = ServerConfig::with_defaults().with_data_dir(dir.path());
        config.download_route = "/health".to_string();
        assert!(bootstrap(&config).is_err());
    }

    #[test]
    fn static_routes_are_accepted() {
        for route in ["/", "/download", "/dl/edu-cosmos.zip", "/files/v1/latest"] {
            assert!(validate_download_route(route).is_ok(), "{route} should be accepted");
        }
    }

    #[test]
    fn parameter_and_wildcard_routes_are_rejected() {
        for route in ["/dl/:file", "/dl/*rest", "/dl/{file}", "/dl/{*rest}", "/dl/a}b"] {
            assert!(validate_download_route(route).is_err(), "{route} should be rejected");
        }
    }

    #[test]
    fn empty_segments_are_rejected() {
        for route in ["//", "/dl//file", "/download/"] {
            assert!(validate_download_route(route).is_err(), "{route} should be rejected");
        }
    }

    #[test]
    fn parameter_route_fails_bootstrap_instead_of_router() {
        let dir = tempdir().unwrap();
        let mut config = ServerConfig::with_defaults().with_data_dir(dir.path());
        config.download_route = "/dl/:file".to_string();
        assert!(bootstrap(&config).is_err());
    }

    #[test]
    fn tab_in_resource_path_is_rejected() {
        let dir = tempdir().unwrap();
        let mut config = ServerConfig::with_defaults().with_data_dir(dir.path());
        config.tally.resource_path = "Download/a\tb.zip".to_string();
        assert!(bootstrap(&config).is_err());
    }

    #[test]
    fn resource_path_must_be_a_header_value() {
        let dir = tempdir().unwrap();
        let mut config = ServerConfig::with_defaults().with_data_dir(dir.path());
        config.tally.resource_path = "Download/bad\nname.zip".to_string();
        assert!(bootstrap(&config).is_err());
    }
}
