//! Response headers middleware.
//!
//! Adds headers to all responses:
//! - Content-Type (every page, error pages included, is HTML)
//! - Content-Security-Policy
//! - X-Content-Type-Options
//! - X-Frame-Options

use axum::http::HeaderValue;
use axum::http::header::{self, HeaderName};
use tower_http::set_header::SetResponseHeaderLayer;

/// Content-Type header value.
const CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Content-Security-Policy header value.
const CSP: &str = "default-src 'self'; \
                   style-src 'self' 'unsafe-inline'; \
                   form-action 'self'; \
                   frame-ancestors 'none'";

/// Create layer that forces the HTML Content-Type header.
pub(crate) fn content_type_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE))
}

/// Create layer that adds Content-Security-Policy header.
pub(crate) fn csp_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static("content-security-policy"),
        HeaderValue::from_static(CSP),
    )
}

/// Create layer that adds X-Content-Type-Options header.
pub(crate) fn content_type_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    )
}

/// Create layer that adds X-Frame-Options header.
pub(crate) fn frame_options_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_value() {
        assert!(HeaderValue::from_str(CONTENT_TYPE).is_ok());
        assert!(CONTENT_TYPE.starts_with("text/html"));
    }

    #[test]
    fn test_csp_value() {
        assert!(CSP.contains("default-src 'self'"));
        assert!(CSP.contains("form-action 'self'"));
        assert!(CSP.contains("frame-ancestors 'none'"));
    }
}
