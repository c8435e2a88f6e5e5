//! Guest list repository.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use guestbook_storage::DocumentStore;
use serde::{Deserialize, Serialize};

use crate::error::GuestbookError;
use crate::ids::{Clock, IdGenerator, SystemClock, TimeRandomIds};

/// A recorded visitor entry.
///
/// Guests are never modified after creation, only appended or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    /// Unique id, the only key used for deletion.
    pub id: String,
    /// Trimmed, non-empty display name.
    pub name: String,
    /// Creation time (serialized as RFC 3339).
    pub added_at: DateTime<Utc>,
}

/// Ordered guest list persisted as a single JSON array.
pub struct GuestBook {
    store: DocumentStore,
    location: String,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    /// Serializes read-modify-write cycles on the document.
    lock: Mutex<()>,
}

impl GuestBook {
    /// Create a guest book stored at `location`.
    ///
    /// Uses the system clock and [`TimeRandomIds`] for new guests.
    #[must_use]
    pub fn new(store: DocumentStore, location: impl Into<String>) -> Self {
        Self {
            store,
            location: location.into(),
            clock: Arc::new(SystemClock),
            ids: Arc::new(TimeRandomIds),
            lock: Mutex::new(()),
        }
    }

    /// Use a custom timestamp source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Use a custom id source.
    #[must_use]
    pub fn with_ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Create the document with an empty list if it doesn't exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::Storage`] if the document can't be created.
    pub fn init(&self) -> Result<(), GuestbookError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.store
            .ensure_exists(&self.location, &Vec::<Guest>::new())?;
        Ok(())
    }

    /// All guests in insertion order.
    ///
    /// A missing or unreadable document yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::Storage`] if the backend fails to read.
    pub fn list(&self) -> Result<Vec<Guest>, GuestbookError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.load()
    }

    /// Append a new guest named `name` (trimmed) and return it.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::Validation`] if the trimmed name is empty,
    /// or [`GuestbookError::Storage`] if persisting fails.
    pub fn add(&self, name: &str) -> Result<Guest, GuestbookError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GuestbookError::missing("name"));
        }

        let added_at = self.clock.now();
        let guest = Guest {
            id: self.ids.generate(added_at),
            name: name.to_owned(),
            added_at,
        };

        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut guests = self.load()?;
        guests.push(guest.clone());
        self.store.save(&self.location, &guests)?;

        tracing::info!(id = %guest.id, "Guest added");
        Ok(guest)
    }

    /// Remove the first guest whose id equals `id` and return it.
    ///
    /// The order of the remaining guests is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::Validation`] if `id` is blank,
    /// [`GuestbookError::NotFound`] if no guest matches (nothing is written),
    /// or [`GuestbookError::Storage`] if persisting fails.
    pub fn delete_by_id(&self, id: &str) -> Result<Guest, GuestbookError> {
        if id.trim().is_empty() {
            return Err(GuestbookError::missing("id"));
        }

        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut guests = self.load()?;
        let index = guests
            .iter()
            .position(|guest| guest.id == id)
            .ok_or_else(|| GuestbookError::NotFound(id.to_owned()))?;
        let removed = guests.remove(index);
        self.store.save(&self.location, &guests)?;

        tracing::info!(id = %removed.id, "Guest deleted");
        Ok(removed)
    }

    /// Discard all guests.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::Storage`] if persisting fails.
    pub fn clear(&self) -> Result<(), GuestbookError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.store.save(&self.location, &Vec::<Guest>::new())?;
        tracing::info!("Guest list cleared");
        Ok(())
    }

    fn load(&self) -> Result<Vec<Guest>, GuestbookError> {
        Ok(self.store.load(&self.location)?.unwrap_or_default())
    }
}

impl std::fmt::Debug for GuestBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuestBook")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}
