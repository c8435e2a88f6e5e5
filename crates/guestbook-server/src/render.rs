//! HTML page rendering.
//!
//! Every page is a body fragment wrapped in one fixed shell by [`wrap`].
//! Fragments are built by handlers with `format!`; anything that did not
//! come from a literal in this crate must pass through [`escape`] first.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Wrap an already-escaped `body` fragment in the page shell.
///
/// The `title` is escaped here.
pub(crate) fn wrap(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<nav><a href="/">Home</a> | <a href="/list">Guests</a> | <a href="/fom">Sign the guestbook</a> | <a href="/stats">Stats</a></nav>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

/// Escape text for embedding in HTML content or quoted attributes.
pub(crate) fn escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Render a complete page.
pub(crate) fn page(title: &str, body: &str) -> Html<String> {
    Html(wrap(title, body))
}

/// Generic 404 page.
pub(crate) fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        page("Not found", "<h1>404 - Page not found</h1>"),
    )
        .into_response()
}

/// Generic 500 page. Never includes error details.
pub(crate) fn server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        page(
            "Server error",
            "<h1>500 - Internal server error</h1>\n<p>Something went wrong. Please try again.</p>",
        ),
    )
        .into_response()
}
