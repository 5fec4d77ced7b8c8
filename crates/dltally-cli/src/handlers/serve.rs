//! `serve` - run the HTTP server until Ctrl-C.

use std::net::IpAddr;
use std::path::PathBuf;

use dltally_axum::bootstrap::validate_download_route;
use dltally_axum::{ServerConfig, start_server};
use tokio_util::sync::CancellationToken;

use crate::bootstrap::CliConfig;
use crate::error::CliError;

/// Server-only arguments of the `serve` command.
pub struct ServeArgs {
    pub port: u16,
    pub bind: IpAddr,
    pub route: String,
    pub static_dir: Option<PathBuf>,
    pub trust_proxy_headers: bool,
    pub expose_log: bool,
}

/// Merge global and server arguments into a `ServerConfig`.
pub fn server_config(config: &CliConfig, args: ServeArgs) -> ServerConfig {
    let mut server = ServerConfig::with_defaults()
        .with_tally(config.tally.clone())
        .with_trusted_proxy_headers(args.trust_proxy_headers)
        .with_exposed_log(args.expose_log);
    server.bind = args.bind;
    server.port = args.port;
    server.download_route = args.route;
    server.data_dir.clone_from(&config.data_dir);
    server.static_dir = args.static_dir;
    server
}

/// Reject settings the server would fail on, before anything is bound.
pub fn check_server_config(server: &ServerConfig) -> Result<(), CliError> {
    server.tally.validate()?;
    validate_download_route(&server.download_route)
        .map_err(|e| CliError::Config(e.to_string()))
}

pub async fn execute(config: &CliConfig, args: ServeArgs) -> Result<(), CliError> {
    let server = server_config(config, args);
    check_server_config(&server)?;
    let cancel = CancellationToken::new();

    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Failed to listen for Ctrl-C: {e}");
                return;
            }
            tracing::info!("Shutdown requested");
            cancel.cancel();
        }
    });

    start_server(server, cancel)
        .await
        .map_err(|e| CliError::Server(format!("{e:#}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dltally_core::TallySettings;

    #[test]
    fn serve_args_override_defaults() {
        let config = CliConfig {
            data_dir: Some("/srv/edu".into()),
            tally: TallySettings::default(),
        };
        let server = server_config(
            &config,
            ServeArgs {
                port: 9000,
                bind: "127.0.0.1".parse().unwrap(),
                route: "/get".to_string(),
                static_dir: Some("/srv/edu/public".into()),
                trust_proxy_headers: true,
                expose_log: true,
            },
        );

        assert_eq!(server.socket_addr().to_string(), "127.0.0.1:9000");
        assert_eq!(server.download_route, "/get");
        assert_eq!(server.data_dir, Some(PathBuf::from("/srv/edu")));
        assert_eq!(server.static_dir, Some(PathBuf::from("/srv/edu/public")));
        assert!(server.trust_proxy_headers);
        assert!(server.expose_log);
    }

    #[test]
    fn bad_route_is_a_configuration_error() {
        let mut server = ServerConfig::with_defaults();
        server.download_route = "/dl/:file".to_string();

        let err = check_server_config(&server).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn tab_in_resource_path_is_a_configuration_error() {
        let mut server = ServerConfig::with_defaults();
        server.tally.resource_path = "Download/a\tb.zip".to_string();

        let err = check_server_config(&server).unwrap_err();
        assert_eq!(err.exit_code(), 78);
    }
}
