//! # Storage Layer
//!
//! This module defines the storage abstraction for tally. The
//! [`DocumentStore`] trait is the sole point of contact with the keyed
//! document collection that holds the inventory; it carries no business
//! logic.
//!
//! ## Design Rationale
//!
//! The store is abstracted behind a trait to:
//! - Enable **testing** with [`memory::MemoryStore`] (no network needed)
//! - Allow **any keyed document backend** to hold the inventory without
//!   changing the controller — the trait is exactly the capability set the
//!   application needs: get-all, get-by-key, set-by-key, delete-by-key
//!
//! ## Implementations
//!
//! - [`http::HttpStore`]: Production store — a remote document collection
//!   reached over HTTP. Documents are flat JSON maps keyed by item name.
//! - [`memory::MemoryStore`]: In-memory storage for testing and development.
//!
//! ## Consistency Contract
//!
//! `upsert_quantity` is a full overwrite (a set, not an increment), even
//! though the controller uses it to implement increments. The plain methods
//! give no atomicity across a read-then-write pair; two clients racing on the
//! same name can lose an update. The conditional variants ([`DocumentStore::upsert_if`],
//! [`DocumentStore::delete_if`]) close that window where a backend supports
//! them; their default implementations fall back to the unguarded sequence so
//! the trait stays satisfiable by any keyed store.

use crate::error::Result;
use crate::model::Item;

pub mod http;
pub mod memory;

/// Outcome of a conditional write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasOutcome {
    /// The stored quantity matched the expectation and the write was applied.
    Applied,
    /// The stored quantity no longer matched; nothing was written.
    Conflict,
}

/// Abstract interface to the inventory's document collection.
///
/// Keys are item names, used verbatim. Absence is `None`, never an error;
/// only transport or backend failures surface as `Err`.
pub trait DocumentStore {
    /// Retrieve every document in the collection, in whatever order the
    /// store returns. A failing call is an error — never an empty list.
    fn fetch_all(&self) -> Result<Vec<Item>>;

    /// Point lookup by name.
    fn get(&self, name: &str) -> Result<Option<Item>>;

    /// Create or overwrite the record for `name` with the given quantity.
    fn upsert_quantity(&mut self, name: &str, quantity: u32) -> Result<()>;

    /// Remove the record for `name`. Succeeds if the record is already gone.
    fn delete(&mut self, name: &str) -> Result<()>;

    /// Overwrite only if the stored quantity still matches `expected`
    /// (`None` = record absent).
    ///
    /// The default implementation is an unguarded read-then-write: it checks
    /// and writes in two steps, so it can still lose a race. Backends with a
    /// native conditional write should override it.
    fn upsert_if(&mut self, name: &str, expected: Option<u32>, quantity: u32) -> Result<CasOutcome> {
        let current = self.get(name)?.map(|item| item.quantity);
        if current != expected {
            return Ok(CasOutcome::Conflict);
        }
        self.upsert_quantity(name, quantity)?;
        Ok(CasOutcome::Applied)
    }

    /// Delete only if the stored quantity still matches `expected`.
    ///
    /// Same fallback caveat as [`DocumentStore::upsert_if`].
    fn delete_if(&mut self, name: &str, expected: u32) -> Result<CasOutcome> {
        match self.get(name)? {
            Some(item) if item.quantity == expected => {
                self.delete(name)?;
                Ok(CasOutcome::Applied)
            }
            _ => Ok(CasOutcome::Conflict),
        }
    }
}
