//! Typed JSON documents on top of a [`Storage`] backend.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::storage::{Storage, StorageError};

/// Whole-value JSON document store.
///
/// Every value is serialized as pretty-printed JSON and replaces whatever was
/// stored before. Cloning is cheap and shares the backend.
#[derive(Clone)]
pub struct DocumentStore {
    storage: Arc<dyn Storage>,
}

impl DocumentStore {
    /// Create a document store over the given backend.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Initialize `location` with `default` unless something is already stored.
    ///
    /// Existing content is left untouched, even if it is corrupt.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the default can't be written.
    pub fn ensure_exists<T: Serialize>(&self, location: &str, default: &T) -> Result<(), StorageError> {
        if self.storage.exists(location) {
            return Ok(());
        }
        tracing::info!(location, "Creating document with default content");
        self.save(location, default)
    }

    /// Load the value stored at `location`.
    ///
    /// Returns `Ok(None)` when the document is missing, or when its content is
    /// not valid JSON for `T`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] only if the backend fails to read an existing document.
    pub fn load<T: DeserializeOwned>(&self, location: &str) -> Result<Option<T>, StorageError> {
        let Some(content) = self.storage.read(location)? else {
            return Ok(None);
        };
        match serde_json::from_slice(&content) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(location, error = %e, "Ignoring unreadable document");
                Ok(None)
            }
        }
    }

    /// Serialize `value` and overwrite `location` with it.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if encoding or writing fails.
    pub fn save<T: Serialize>(&self, location: &str, value: &T) -> Result<(), StorageError> {
        let mut content =
            serde_json::to_vec_pretty(value).map_err(|e| StorageError::json(e, location))?;
        content.push(b'\n');
        self.storage.write(location, &content)
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::mock::MockStorage;
    use crate::storage::StorageErrorKind;

    fn store_with(storage: &Arc<MockStorage>) -> DocumentStore {
        DocumentStore::new(Arc::clone(storage) as Arc<dyn Storage>)
    }

    #[test]
    fn test_ensure_exists_writes_default() {
        let storage = Arc::new(MockStorage::new());
        let store = store_with(&storage);

        store.ensure_exists("guests.json", &Vec::<String>::new()).unwrap();

        assert_eq!(storage.content("guests.json").as_deref(), Some("[]\n"));
    }

    #[test]
    fn test_ensure_exists_is_idempotent() {
        let storage = Arc::new(MockStorage::new().with_document("guests.json", "[\"Ann\"]"));
        let store = store_with(&storage);

        store.ensure_exists("guests.json", &Vec::<String>::new()).unwrap();
        store.ensure_exists("guests.json", &Vec::<String>::new()).unwrap();

        assert_eq!(storage.content("guests.json").as_deref(), Some("[\"Ann\"]"));
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn test_load_missing_is_none() {
        let storage = Arc::new(MockStorage::new());
        let store = store_with(&storage);

        let value: Option<Vec<String>> = store.load("guests.json").unwrap();

        assert_eq!(value, None);
    }

    #[test]
    fn test_load_corrupt_is_none() {
        let storage = Arc::new(MockStorage::new().with_document("guests.json", "[\"Ann\""));
        let store = store_with(&storage);

        let value: Option<Vec<String>> = store.load("guests.json").unwrap();

        assert_eq!(value, None);
    }

    #[test]
    fn test_load_invalid_utf8_is_none() {
        let storage = Arc::new(MockStorage::new().with_document("visits.json", vec![0xff, 0xfe, b'{']));
        let store = store_with(&storage);

        let value: Option<BTreeMap<String, u64>> = store.load("visits.json").unwrap();

        assert_eq!(value, None);
    }

    #[test]
    fn test_load_schema_mismatch_is_none() {
        let storage = Arc::new(MockStorage::new().with_document("visits.json", "{\"total\": -1}"));
        let store = store_with(&storage);

        let value: Option<BTreeMap<String, u64>> = store.load("visits.json").unwrap();

        assert_eq!(value, None);
    }

    #[test]
    fn test_save_then_load() {
        let storage = Arc::new(MockStorage::new());
        let store = store_with(&storage);
        let mut counts = BTreeMap::new();
        counts.insert("127.0.0.1".to_owned(), 2_u64);

        store.save("visits.json", &counts).unwrap();
        let loaded: Option<BTreeMap<String, u64>> = store.load("visits.json").unwrap();

        assert_eq!(loaded, Some(counts));
    }

    #[test]
    fn test_save_propagates_backend_failure() {
        let storage = Arc::new(MockStorage::new());
        storage.fail_writes(true);
        let store = store_with(&storage);

        let err = store.save("guests.json", &Vec::<String>::new()).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
    }
}
