//! Client address extraction from requests.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Determines the client address for click tracking.
///
/// When the service runs behind a trusted reverse proxy (`BEHIND_PROXY`),
/// the `X-Forwarded-For` chain's first entry wins, falling back to
/// `X-Real-IP`. Otherwise the socket peer address is used; forwarding
/// headers from untrusted clients are ignored since they are trivially
/// spoofable.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
            if let Some(first) = forwarded.split(',').next() {
                let candidate = first.trim();
                if !candidate.is_empty() {
                    return candidate.to_string();
                }
            }
        }

        if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
            let candidate = real_ip.trim();
            if !candidate.is_empty() {
                return candidate.to_string();
            }
        }
    }

    peer.ip().to_string()
}
