//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for raw document access, along with
//! [`StorageError`] for unified error handling across backends.
//!
//! # Locations
//!
//! Every method takes a **location**: a bare document name like `"guests.json"`.
//! Backends decide where that name lives (a file under a data directory, a key
//! in an in-memory map).

use std::path::PathBuf;

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Document does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Location is not a valid document name.
    InvalidPath,
    /// Document content could not be encoded or decoded.
    InvalidData,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Location context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach location context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create an invalid path error for a rejected location.
    #[must_use]
    pub fn invalid_path(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::InvalidPath).with_path(path)
    }

    /// Create a storage error from a JSON encoding failure.
    #[must_use]
    pub fn json(err: serde_json::Error, path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::InvalidData)
            .with_path(path)
            .with_source(err)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::InvalidData => StorageErrorKind::InvalidData,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: guests.json)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::InvalidData => "Invalid data",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Raw document storage.
///
/// Implementations read and write whole documents; there are no partial
/// updates. Typed access goes through [`DocumentStore`](crate::DocumentStore).
pub trait Storage: Send + Sync {
    /// Read the raw bytes of a document.
    ///
    /// Returns `Ok(None)` if nothing is stored at `location`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the document exists but can't be read.
    fn read(&self, location: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the full content of a document, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the document can't be written.
    fn write(&self, location: &str, content: &[u8]) -> Result<(), StorageError>;

    /// Check if a document exists at `location`.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, location: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_storage_error_new() {
        let err = StorageError::new(StorageErrorKind::NotFound);

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert!(err.path.is_none());
        assert!(err.backend.is_none());
    }

    #[test]
    fn test_storage_error_with_path() {
        let err = StorageError::new(StorageErrorKind::Other).with_path("guests.json");

        assert_eq!(err.path.as_deref(), Some(Path::new("guests.json")));
    }

    #[test]
    fn test_storage_error_io_kinds() {
        let not_found = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let other = std::io::Error::other("disk on fire");

        assert_eq!(
            StorageError::io(not_found, None).kind,
            StorageErrorKind::NotFound
        );
        assert_eq!(
            StorageError::io(denied, None).kind,
            StorageErrorKind::PermissionDenied
        );
        assert_eq!(StorageError::io(other, None).kind, StorageErrorKind::Other);
    }

    #[test]
    fn test_storage_error_json_keeps_source() {
        let json_err = serde_json::from_str::<u64>("nope").unwrap_err();
        let err = StorageError::json(json_err, "visits.json");

        assert_eq!(err.kind, StorageErrorKind::InvalidData);
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.is::<serde_json::Error>());
    }

    #[test]
    fn test_storage_error_display_simple() {
        let err = StorageError::new(StorageErrorKind::NotFound);

        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn test_storage_error_display_full() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = StorageError::new(StorageErrorKind::PermissionDenied)
            .with_backend("Fs")
            .with_path("guests.json")
            .with_source(io_err);

        assert_eq!(
            err.to_string(),
            "[Fs] Permission denied: read-only (path: guests.json)"
        );
    }

    #[test]
    fn test_storage_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StorageError>();
    }
}
