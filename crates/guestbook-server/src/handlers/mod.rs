//! HTTP request handlers.

pub(crate) mod guests;
pub(crate) mod home;
pub(crate) mod stats;

use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use guestbook_storage::StorageError;

use crate::error::ServerError;
use crate::render::{self, escape};

/// Run repository I/O on the blocking thread pool.
pub(crate) async fn blocking<F, T>(f: F) -> Result<T, ServerError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await?)
}

/// Page shown when a document can't be read or saved.
///
/// Rendered with a success status, like validation pages.
pub(crate) fn storage_failure(action: &str, err: &StorageError) -> Html<String> {
    tracing::error!(error = %err, action, "Storage operation failed");
    render::page(
        "Error",
        &format!(
            "<h1>Error</h1>\n<p>Could not {}.</p>\n<p><small>{}</small></p>",
            escape(action),
            escape(&err.to_string())
        ),
    )
}

/// Handle any unknown route or unsupported method on a known route.
pub(crate) async fn not_found() -> Response {
    render::not_found()
}

/// Handle unsupported methods on `/add`.
pub(crate) async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET, HEAD, POST")],
        render::page(
            "Method not allowed",
            "<h1>405 - Method not allowed</h1>\n<p><code>/add</code> accepts only GET and POST.</p>",
        ),
    )
        .into_response()
}
