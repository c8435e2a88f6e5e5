//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use guestbook_core::{GuestBook, GuestbookError, Ledger};
use guestbook_storage::{DocumentStore, Storage};

/// Application state shared across all handlers.
#[derive(Debug)]
pub struct AppState {
    /// Guest list repository.
    pub(crate) guests: GuestBook,
    /// Visit counters.
    pub(crate) ledger: Ledger,
}

impl AppState {
    /// Create state from already configured repositories.
    #[must_use]
    pub fn new(guests: GuestBook, ledger: Ledger) -> Self {
        Self { guests, ledger }
    }

    /// Create state with both documents on one storage backend.
    #[must_use]
    pub fn from_storage(storage: Arc<dyn Storage>, guests_file: &str, visits_file: &str) -> Self {
        let store = DocumentStore::new(storage);
        Self::new(
            GuestBook::new(store.clone(), guests_file),
            Ledger::new(store, visits_file),
        )
    }

    /// Create both documents with empty defaults if they are missing.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::Storage`] if a document can't be created.
    pub fn init(&self) -> Result<(), GuestbookError> {
        self.guests.init()?;
        self.ledger.init()
    }
}
