//! Client address extraction.
//!
//! The peer address comes from `ConnectInfo<SocketAddr>`, which requires the
//! router to be served with `into_make_service_with_connect_info`. When proxy
//! headers are trusted, `X-Forwarded-For` (first hop) and then `X-Real-IP`
//! take precedence, provided they parse as IP addresses.

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;

use crate::state::AppState;

/// Placeholder recorded when no address is known.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Network address of the requesting client, IP only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddress(pub String);

impl ClientAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve the address from headers and the connection peer.
    pub fn resolve(headers: &HeaderMap, peer: Option<SocketAddr>, trust_proxy_headers: bool) -> Self {
        if trust_proxy_headers {
            if let Some(ip) = forwarded_ip(headers) {
                return Self(ip.to_string());
            }
        }
        peer.map_or_else(
            || Self(UNKNOWN_CLIENT.to_string()),
            |addr| Self(addr.ip().to_string()),
        )
    }
}

fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let first_hop = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|v| v.trim().parse::<IpAddr>().ok());

    first_hop.or_else(|| {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<IpAddr>().ok())
    })
}

impl FromRequestParts<AppState> for ClientAddress {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let peer = ConnectInfo::<SocketAddr>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|ConnectInfo(addr)| addr);
        Ok(Self::resolve(&parts.headers, peer, state.trust_proxy_headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> Option<SocketAddr> {
        Some("203.0.113.5:51234".parse().unwrap())
    }

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn peer_address_drops_port() {
        let addr = ClientAddress::resolve(&HeaderMap::new(), peer(), false);
        assert_eq!(addr.as_str(), "203.0.113.5");
    }

    #[test]
    fn proxy_headers_ignored_unless_trusted() {
        let map = headers(&[("x-forwarded-for", "198.51.100.7")]);
        assert_eq!(ClientAddress::resolve(&map, peer(), false).as_str(), "203.0.113.5");
        assert_eq!(ClientAddress::resolve(&map, peer(), true).as_str(), "198.51.100.7");
    }

    #[test]
    fn first_forwarded_hop_wins() {
        let map = headers(&[
            ("x-forwarded-for", "198.51.100.7, 10.0.0.1"),
            ("x-real-ip", "192.0.2.9"),
        ]);
        assert_eq!(ClientAddress::resolve(&map, peer(), true).as_str(), "198.51.100.7");
    }

    #[test]
    fn falls_back_to_real_ip_then_peer() {
        let map = headers(&[("x-forwarded-for", "garbage"), ("x-real-ip", "2001:db8::1")]);
        assert_eq!(ClientAddress::resolve(&map, peer(), true).as_str(), "2001:db8::1");

        let map = headers(&[("x-real-ip", "not-an-ip")]);
        assert_eq!(ClientAddress::resolve(&map, peer(), true).as_str(), "203.0.113.5");
    }

    #[test]
    fn missing_peer_is_unknown() {
        assert_eq!(
            ClientAddress::resolve(&HeaderMap::new(), None, false).as_str(),
            UNKNOWN_CLIENT
        );
    }
}
