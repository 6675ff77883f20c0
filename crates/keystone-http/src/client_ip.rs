use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use http::HeaderMap;
use http::request::Parts;

/// Best guess at the client's address
///
/// Checks `X-Forwarded-For` (first entry), then `X-Real-IP`, then the socket
/// peer. Proxy headers are trivially spoofed: only rely on them behind
/// infrastructure that overwrites them.
pub fn client_ip(headers: &HeaderMap, remote: Option<SocketAddr>) -> Option<String> {
    if let Some(forwarded) = headers.get("x-forwarded-for")
        && let Ok(val) = forwarded.to_str()
        && let Some(first) = val.split(',').next().map(str::trim)
        && !first.is_empty()
    {
        return Some(first.to_owned());
    }

    if let Some(real_ip) = headers.get("x-real-ip")
        && let Ok(val) = real_ip.to_str()
        && !val.trim().is_empty()
    {
        return Some(val.trim().to_owned());
    }

    remote.map(|addr| addr.ip().to_string())
}

/// Extractor for [`client_ip`]
///
/// The socket peer is only known when the server is started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub Option<String>);

impl<S: Send + Sync> FromRequestParts<S> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let remote = parts.extensions.get::<ConnectInfo<SocketAddr>>().map(|info| info.0);
        Ok(Self(client_ip(&parts.headers, remote)))
    }
}
