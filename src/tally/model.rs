use serde::{Deserialize, Serialize};

/// A tracked inventory item.
///
/// `name` doubles as the document key in the store: case-sensitive, used
/// verbatim for lookups. A stored item always has `quantity >= 1` — a
/// decrement that would reach zero deletes the record instead, so
/// zero-quantity records never exist at rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub quantity: u32,
}

impl Item {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}
