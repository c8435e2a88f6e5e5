//! Client address extraction.

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;

/// Address reported when neither a forwarded header nor a peer address exists.
const UNKNOWN: &str = "unknown";

/// Prefix of IPv6-mapped IPv4 addresses (`::ffff:1.2.3.4`).
const MAPPED_IPV4_PREFIX: &str = "::ffff:";

/// Address of the requesting client.
///
/// Taken from the first `X-Forwarded-For` entry, else from the TCP peer
/// (requires serving with `into_make_service_with_connect_info`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClientAddr(pub(crate) String);

impl<S> FromRequestParts<S> for ClientAddr
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        Ok(Self(client_address(&parts.headers, peer)))
    }
}

/// Resolve the client address from request headers and the peer IP.
fn client_address(headers: &HeaderMap, peer: Option<IpAddr>) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let address = match (forwarded, peer) {
        (Some(forwarded), _) => forwarded.to_owned(),
        (None, Some(ip)) => ip.to_string(),
        (None, None) => return UNKNOWN.to_owned(),
    };
    strip_mapped_prefix(&address).to_owned()
}

/// Strip the `::ffff:` prefix of an IPv6-mapped IPv4 address.
fn strip_mapped_prefix(address: &str) -> &str {
    match address.get(..MAPPED_IPV4_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(MAPPED_IPV4_PREFIX) => {
            &address[MAPPED_IPV4_PREFIX.len()..]
        }
        _ => address,
    }
}
