//! Error types for the HTTP server.

use axum::response::{IntoResponse, Response};
use guestbook_core::GuestbookError;

use crate::render;

/// Unexpected failure while handling a request.
///
/// Expected outcomes (validation, not found, failed saves) are rendered by the
/// handlers themselves; anything reaching this type becomes a generic 500 page.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Blocking storage task panicked or was cancelled.
    #[error("Storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Guestbook error with no dedicated page on this route.
    #[error("Unhandled guestbook error: {0}")]
    Guestbook(#[from] GuestbookError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        render::server_error()
    }
}
