//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Keeps documents in memory. Use the builder methods to seed content, and
/// [`MockStorage::fail_writes`] to simulate a read-only backend.
///
/// # Example
///
/// ```ignore
/// use guestbook_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new().with_document("guests.json", "[]");
/// assert!(storage.exists("guests.json"));
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    documents: RwLock<HashMap<String, Vec<u8>>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document with raw content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_document(self, location: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.documents
            .write()
            .unwrap()
            .insert(location.into(), content.into());
        self
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Content currently stored at `location`, decoded lossily as UTF-8.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn content(&self, location: &str) -> Option<String> {
        self.documents
            .read()
            .unwrap()
            .get(location)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Storage for MockStorage {
    fn read(&self, location: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.documents.read().unwrap().get(location).cloned())
    }

    fn write(&self, location: &str, content: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_backend(BACKEND)
                .with_path(location));
        }
        self.documents
            .write()
            .unwrap()
            .insert(location.to_owned(), content.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn exists(&self, location: &str) -> bool {
        self.documents.read().unwrap().contains_key(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_storage_round_trip() {
        let storage = MockStorage::new();

        storage.write("guests.json", b"[]").unwrap();

        assert!(storage.exists("guests.json"));
        assert_eq!(storage.read("guests.json").unwrap().as_deref(), Some(&b"[]"[..]));
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn test_mock_storage_missing() {
        let storage = MockStorage::new();

        assert!(!storage.exists("guests.json"));
        assert_eq!(storage.read("guests.json").unwrap(), None);
    }

    #[test]
    fn test_mock_storage_fail_writes() {
        let storage = MockStorage::new().with_document("guests.json", "[]");
        storage.fail_writes(true);

        let err = storage.write("guests.json", b"[1]").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
        assert_eq!(err.backend, Some("Mock"));
        assert_eq!(storage.content("guests.json").as_deref(), Some("[]"));
        assert_eq!(storage.write_count(), 0);
    }
}
