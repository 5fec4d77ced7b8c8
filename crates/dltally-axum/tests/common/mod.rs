//! Shared fixtures for dltally-axum tests.

use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use axum::extract::connect_info::MockConnectInfo;
use dltally_axum::bootstrap::{ServerConfig, bootstrap};
use dltally_axum::routes::create_router;
use dltally_core::TallySettings;

/// Resource path used by every test config.
pub const TEST_RESOURCE: &str = "Download/ODYSSEUS-EduCOSMOS-master.zip";

/// Peer address injected with `MockConnectInfo`.
pub const TEST_PEER_IP: [u8; 4] = [203, 0, 113, 5];

/// Config rooted in `dir` with default file names.
pub fn test_config(dir: &Path) -> ServerConfig {
    ServerConfig::with_defaults()
        .with_data_dir(dir)
        .with_tally(TallySettings {
            resource_path: TEST_RESOURCE.to_string(),
            ..TallySettings::default()
        })
}

/// Router with a fixed peer address.
pub fn router(config: &ServerConfig) -> Router {
    let ctx = bootstrap(config).expect("bootstrap");
    create_router(ctx).layer(MockConnectInfo(SocketAddr::from((TEST_PEER_IP, 51234))))
}
