//! JSON document storage for the guestbook.
//!
//! This crate owns every byte the guestbook persists. It is split in two layers:
//!
//! - [`Storage`] trait: raw document bytes addressed by location (a bare file
//!   name such as `"guests.json"`), with [`FsStorage`] for the local filesystem
//!   and [`MockStorage`] for tests (behind the `mock` feature flag)
//! - [`DocumentStore`]: typed whole-value JSON on top of any [`Storage`]
//!
//! Documents are always read fully and rewritten fully. There is no partial
//! update and no write atomicity: a crash mid-write may leave a corrupt document,
//! which [`DocumentStore::load`] then reports as absent.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use guestbook_storage::{DocumentStore, FsStorage};
//!
//! let store = DocumentStore::new(Arc::new(FsStorage::new(PathBuf::from("data"))));
//! store.ensure_exists("visits.json", &0_u64)?;
//! let total: Option<u64> = store.load("visits.json")?;
//! ```

mod document;
mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod storage;

pub use document::DocumentStore;
pub use fs::FsStorage;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
