//! Error types for guestbook operations.

use guestbook_storage::StorageError;

/// Guestbook operation error.
#[derive(Debug, thiserror::Error)]
pub enum GuestbookError {
    /// A required field was missing or blank.
    #[error("Missing required field: {field}")]
    Validation {
        /// Name of the missing field (e.g., "name", "id").
        field: &'static str,
    },

    /// No guest with the given id.
    #[error("Guest not found: {0}")]
    NotFound(String),

    /// The backing document could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl GuestbookError {
    /// Create a validation error for a blank field.
    #[must_use]
    pub fn missing(field: &'static str) -> Self {
        Self::Validation { field }
    }
}
