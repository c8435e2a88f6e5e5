//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for keeping documents as plain files inside a
//! single data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::storage::{Storage, StorageError};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// Each location maps to a file directly inside `data_dir`. Locations must be
/// bare file names; anything that would escape the directory is rejected.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use guestbook_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("data"));
/// storage.write("guests.json", b"[]")?;
/// ```
#[derive(Debug)]
pub struct FsStorage {
    /// Directory holding all documents.
    data_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `data_dir`.
    ///
    /// The directory is created lazily on first write.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Map a location to its file path.
    fn resolve(&self, location: &str) -> Result<PathBuf, StorageError> {
        let is_bare_name = !location.is_empty()
            && location != "."
            && location != ".."
            && !location.contains(['/', '\\']);
        if !is_bare_name {
            return Err(StorageError::invalid_path(location).with_backend(BACKEND));
        }
        Ok(self.data_dir.join(location))
    }
}

impl Storage for FsStorage {
    fn read(&self, location: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.resolve(location)?;
        match fs::read(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(e, Some(path)).with_backend(BACKEND)),
        }
    }

    fn write(&self, location: &str, content: &[u8]) -> Result<(), StorageError> {
        let path = self.resolve(location)?;
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| StorageError::io(e, Some(self.data_dir.clone())).with_backend(BACKEND))?;
        fs::write(&path, content)
            .map_err(|e| StorageError::io(e, Some(path)).with_backend(BACKEND))
    }

    fn exists(&self, location: &str) -> bool {
        self.resolve(location).is_ok_and(|path| path.is_file())
    }
}
