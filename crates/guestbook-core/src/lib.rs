//! Guest list and visit ledger for the guestbook.
//!
//! Both repositories persist through a [`DocumentStore`](guestbook_storage::DocumentStore)
//! and follow the same cycle on every mutation: load the whole document,
//! change it in memory, write the whole document back. The stored document is
//! the source of truth; nothing is cached between calls.
//!
//! - [`GuestBook`]: ordered list of [`Guest`] entries
//! - [`Ledger`]: [`VisitLedger`] counters, total and per client address
//!
//! Each repository holds a mutex around its read-modify-write cycle, so
//! concurrent requests inside one process never lose updates. Separate
//! processes sharing the same files still race (last writer wins).

mod error;
mod guests;
mod ids;
mod visits;

pub use error::GuestbookError;
pub use guests::{Guest, GuestBook};
pub use ids::{Clock, IdGenerator, SystemClock, TimeRandomIds};
pub use visits::{Ledger, VisitCount, VisitLedger};
