//! Visit counters.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use guestbook_storage::DocumentStore;
use serde::{Deserialize, Serialize};

use crate::error::GuestbookError;

/// Aggregate page-view counters.
///
/// `total` and `by_address` are incremented together but kept independently;
/// the total is not derived from the per-address counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitLedger {
    /// All recorded visits.
    pub total: u64,
    /// Visits per client address.
    pub by_address: BTreeMap<String, u64>,
}

impl VisitLedger {
    /// Per-address counts, highest first.
    ///
    /// Addresses with equal counts are ordered alphabetically.
    #[must_use]
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .by_address
            .iter()
            .map(|(address, count)| (address.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    /// Count one visit from `address` and return the updated counters.
    fn record(&mut self, address: &str) -> VisitCount {
        self.total = self.total.saturating_add(1);
        let count = self.by_address.entry(address.to_owned()).or_insert(0);
        *count = count.saturating_add(1);
        VisitCount {
            total: self.total,
            address: *count,
        }
    }
}

/// Counters right after a recorded visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitCount {
    /// New total visit count.
    pub total: u64,
    /// New visit count for the recording address.
    pub address: u64,
}

/// Visit ledger persisted as a single JSON object.
pub struct Ledger {
    store: DocumentStore,
    location: String,
    lock: Mutex<()>,
}

impl Ledger {
    /// Create a ledger stored at `location`.
    #[must_use]
    pub fn new(store: DocumentStore, location: impl Into<String>) -> Self {
        Self {
            store,
            location: location.into(),
            lock: Mutex::new(()),
        }
    }

    /// Create the document with zero counters if it doesn't exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::Storage`] if the document can't be created.
    pub fn init(&self) -> Result<(), GuestbookError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.store
            .ensure_exists(&self.location, &VisitLedger::default())?;
        Ok(())
    }

    /// Record one visit from `address`.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::Storage`] if the ledger can't be read or written.
    pub fn record_visit(&self, address: &str) -> Result<VisitCount, GuestbookError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut ledger = self.load()?;
        let count = ledger.record(address);
        self.store.save(&self.location, &ledger)?;

        tracing::debug!(address, total = count.total, "Visit recorded");
        Ok(count)
    }

    /// Current counters (zero if nothing was recorded yet).
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::Storage`] if the backend fails to read.
    pub fn snapshot(&self) -> Result<VisitLedger, GuestbookError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.load()
    }

    fn load(&self) -> Result<VisitLedger, GuestbookError> {
        Ok(self.store.load(&self.location)?.unwrap_or_default())
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}
