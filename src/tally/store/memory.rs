use super::{CasOutcome, DocumentStore};
use crate::error::Result;
use crate::model::Item;
use std::collections::BTreeMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
///
/// Backed by a `BTreeMap`, so `fetch_all` returns items in name order —
/// stable across runs, which the tests rely on.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: BTreeMap<String, u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn fetch_all(&self) -> Result<Vec<Item>> {
        Ok(self
            .items
            .iter()
            .map(|(name, quantity)| Item::new(name.clone(), *quantity))
            .collect())
    }

    fn get(&self, name: &str) -> Result<Option<Item>> {
        Ok(self
            .items
            .get(name)
            .map(|quantity| Item::new(name, *quantity)))
    }

    fn upsert_quantity(&mut self, name: &str, quantity: u32) -> Result<()> {
        self.items.insert(name.to_string(), quantity);
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<()> {
        self.items.remove(name);
        Ok(())
    }

    // The in-process map makes check and write a single step, so these two
    // are genuinely atomic here, unlike the trait defaults.

    fn upsert_if(&mut self, name: &str, expected: Option<u32>, quantity: u32) -> Result<CasOutcome> {
        if self.items.get(name).copied() != expected {
            return Ok(CasOutcome::Conflict);
        }
        self.items.insert(name.to_string(), quantity);
        Ok(CasOutcome::Applied)
    }

    fn delete_if(&mut self, name: &str, expected: u32) -> Result<CasOutcome> {
        if self.items.get(name).copied() != Some(expected) {
            return Ok(CasOutcome::Conflict);
        }
        self.items.remove(name);
        Ok(CasOutcome::Applied)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: MemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: MemoryStore::new(),
            }
        }

        pub fn with_item(mut self, name: &str, quantity: u32) -> Self {
            self.store.upsert_quantity(name, quantity).unwrap();
            self
        }
    }
}
