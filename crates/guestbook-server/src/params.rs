//! URL-encoded request parameters.
//!
//! Query strings and form bodies share one decoder. Input that fails to decode
//! is treated as if no parameters were sent, so handlers report a missing
//! field instead of a protocol error.

use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Parameters of `/add`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct NameParams {
    pub(crate) name: Option<String>,
}

/// Parameters of `/delete`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct IdParams {
    pub(crate) id: Option<String>,
}

/// Decode `application/x-www-form-urlencoded` input.
pub(crate) fn decode<T: DeserializeOwned + Default>(input: &[u8]) -> T {
    serde_urlencoded::from_bytes(input).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Ignoring malformed parameters");
        T::default()
    })
}

/// Decode an optional raw query string.
pub(crate) fn decode_query<T: DeserializeOwned + Default>(query: Option<&str>) -> T {
    query.map_or_else(T::default, |q| decode(q.as_bytes()))
}

/// Encode a single `key=value` pair for use in a link.
pub(crate) fn encode_pair(key: &str, value: &str) -> String {
    serde_urlencoded::to_string([(key, value)]).unwrap_or_default()
}
