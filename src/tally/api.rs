//! # API Facade
//!
//! [`InventoryApi`] is the single entry point for all tally operations,
//! regardless of the UI driving it. It dispatches to the command layer and
//! owns the **view state**: the last fetched snapshot of the collection (the
//! view list), the current search text, and the filtered view derived from
//! the two.
//!
//! ## Reconciliation Contract
//!
//! The view list is a disposable cache. It is never patched in place: the
//! only way it changes is a full [`InventoryApi::refresh`], and every
//! mutation ends with one. After a failed operation the view keeps its last
//! known good state — stale until the next successful refresh, never
//! half-updated.
//!
//! ## Generic Over DocumentStore
//!
//! `InventoryApi<S: DocumentStore>` is generic over the storage backend:
//! - Production: `InventoryApi<HttpStore>`
//! - Testing: `InventoryApi<MemoryStore>`
//!
//! so the whole controller is exercised in tests without any network.

use crate::commands::{self, CmdResult, WritePolicy};
use crate::error::Result;
use crate::model::Item;
use crate::store::DocumentStore;
use tracing::debug;

pub use crate::commands::{CmdMessage, MessageLevel};

/// Application controller: translates user intents into store calls and
/// keeps the view list a faithful snapshot of the collection.
pub struct InventoryApi<S: DocumentStore> {
    store: S,
    policy: WritePolicy,
    items: Vec<Item>,
    search: String,
    filtered: Vec<Item>,
}

impl<S: DocumentStore> InventoryApi<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: WritePolicy::default(),
            items: Vec::new(),
            search: String::new(),
            filtered: Vec::new(),
        }
    }

    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Re-fetch the entire collection and rebuild the view list and the
    /// filtered view. The only way the view list is ever updated.
    pub fn refresh(&mut self) -> Result<()> {
        let items = self.store.fetch_all()?;
        debug!(count = items.len(), "view refreshed");
        self.items = items;
        self.refilter();
        Ok(())
    }

    /// Add one unit of `name`, creating the record at quantity 1 if absent,
    /// then refresh the view.
    pub fn add_item(&mut self, name: &str) -> Result<CmdResult> {
        let result = commands::add::run(&mut self.store, name, self.policy)?;
        self.refresh()?;
        Ok(result)
    }

    /// Remove one unit of `name`; the last unit deletes the record. Inert if
    /// the name is not tracked. Refreshes the view.
    pub fn remove_item(&mut self, name: &str) -> Result<CmdResult> {
        let result = commands::remove::run(&mut self.store, name, self.policy)?;
        self.refresh()?;
        Ok(result)
    }

    /// Drop the record for `name` outright, then refresh the view.
    pub fn purge_item(&mut self, name: &str) -> Result<CmdResult> {
        let result = commands::purge::run(&mut self.store, name)?;
        self.refresh()?;
        Ok(result)
    }

    /// Update the search text and recompute the filtered view from the
    /// current view list. No store traffic.
    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
        self.refilter();
    }

    /// The view list: snapshot of the collection at the last successful
    /// refresh, in store order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The subsequence of the view list matching the search text.
    pub fn filtered(&self) -> &[Item] {
        &self.filtered
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    fn refilter(&mut self) {
        self.filtered = commands::search::filter(&self.items, &self.search);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TallyError;
    use crate::store::memory::MemoryStore;
    use crate::store::{CasOutcome, DocumentStore};

    fn api() -> InventoryApi<MemoryStore> {
        InventoryApi::new(MemoryStore::new())
    }

    #[test]
    fn add_remove_lifecycle_round_trip() {
        let mut api = api();

        api.add_item("apple").unwrap();
        assert_eq!(api.items(), &[Item::new("apple", 1)]);

        api.add_item("apple").unwrap();
        assert_eq!(api.items(), &[Item::new("apple", 2)]);

        api.remove_item("apple").unwrap();
        assert_eq!(api.items(), &[Item::new("apple", 1)]);

        api.remove_item("apple").unwrap();
        assert!(api.items().is_empty());
    }

    #[test]
    fn purge_drops_the_whole_record() {
        let mut api = api();
        api.add_item("apple").unwrap();
        api.add_item("apple").unwrap();
        api.add_item("apple").unwrap();

        api.purge_item("apple").unwrap();
        assert!(api.items().is_empty());
    }

    #[test]
    fn view_tracks_store_after_every_mutation() {
        let mut api = api();
        api.add_item("apple").unwrap();
        api.add_item("banana").unwrap();

        // The view list mirrors the store without an explicit refresh call.
        let names: Vec<_> = api.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["apple", "banana"]);
    }

    #[test]
    fn search_filters_without_touching_the_store() {
        let mut api = api();
        for name in ["apple", "banana", "grape"] {
            api.add_item(name).unwrap();
        }

        api.set_search("ap");
        let names: Vec<_> = api.filtered().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["apple", "grape"]);

        api.set_search("");
        assert_eq!(api.filtered().len(), 3);
    }

    #[test]
    fn filtered_view_follows_refreshes() {
        let mut api = api();
        api.set_search("ap");
        api.add_item("apple").unwrap();
        assert_eq!(api.filtered().len(), 1);

        api.remove_item("apple").unwrap();
        assert!(api.filtered().is_empty());
    }

    #[test]
    fn invalid_name_reaches_neither_store_nor_view() {
        let mut api = api();
        assert!(matches!(api.add_item("  "), Err(TallyError::InvalidName)));
        assert!(api.items().is_empty());
    }

    /// Store whose mutations all fail, for exercising the stale-view
    /// contract.
    struct DownStore;

    impl DocumentStore for DownStore {
        fn fetch_all(&self) -> crate::error::Result<Vec<Item>> {
            Err(TallyError::StoreUnavailable("down".into()))
        }
        fn get(&self, _name: &str) -> crate::error::Result<Option<Item>> {
            Err(TallyError::StoreUnavailable("down".into()))
        }
        fn upsert_quantity(&mut self, _name: &str, _quantity: u32) -> crate::error::Result<()> {
            Err(TallyError::StoreUnavailable("down".into()))
        }
        fn delete(&mut self, _name: &str) -> crate::error::Result<()> {
            Err(TallyError::StoreUnavailable("down".into()))
        }
    }

    #[test]
    fn failed_mutation_leaves_view_at_last_known_good_state() {
        let mut api = InventoryApi::new(DownStore);
        assert!(matches!(
            api.add_item("apple"),
            Err(TallyError::StoreUnavailable(_))
        ));
        assert!(api.items().is_empty());
    }

    /// Store that reports a stale quantity once, to force one conflict.
    struct FlakyStore {
        inner: MemoryStore,
        conflicts_left: u32,
    }

    impl DocumentStore for FlakyStore {
        fn fetch_all(&self) -> crate::error::Result<Vec<Item>> {
            self.inner.fetch_all()
        }
        fn get(&self, name: &str) -> crate::error::Result<Option<Item>> {
            self.inner.get(name)
        }
        fn upsert_quantity(&mut self, name: &str, quantity: u32) -> crate::error::Result<()> {
            self.inner.upsert_quantity(name, quantity)
        }
        fn delete(&mut self, name: &str) -> crate::error::Result<()> {
            self.inner.delete(name)
        }
        fn upsert_if(
            &mut self,
            name: &str,
            expected: Option<u32>,
            quantity: u32,
        ) -> crate::error::Result<CasOutcome> {
            if self.conflicts_left > 0 {
                self.conflicts_left -= 1;
                return Ok(CasOutcome::Conflict);
            }
            self.inner.upsert_if(name, expected, quantity)
        }
    }

    #[test]
    fn checked_writes_retry_past_a_lost_race() {
        let store = FlakyStore {
            inner: MemoryStore::new(),
            conflicts_left: 1,
        };
        let mut api = InventoryApi::new(store).with_write_policy(WritePolicy::Checked);

        api.add_item("apple").unwrap();
        assert_eq!(api.items(), &[Item::new("apple", 1)]);
    }
}
