//! Ordered, kind-keyed item storage.
//!
//! An inventory holds at most one item per [`ItemKind`]. Insertion order
//! is preserved so listings stay stable across a run.

use serde::{Deserialize, Serialize};

use crate::item::{Item, ItemKind};

/// A player's carried items, unique by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is carried.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if an item of `kind` is carried.
    pub fn contains(&self, kind: ItemKind) -> bool {
        self.items.iter().any(|i| i.kind == kind)
    }

    /// The carried item of `kind`, if any.
    pub fn get(&self, kind: ItemKind) -> Option<&Item> {
        self.items.iter().find(|i| i.kind == kind)
    }

    /// Insert an item, replacing any item of the same kind in place.
    ///
    /// Returns the replaced item.
    pub fn upsert(&mut self, item: Item) -> Option<Item> {
        match self.items.iter_mut().find(|i| i.kind == item.kind) {
            Some(slot) => Some(std::mem::replace(slot, item)),
            None => {
                self.items.push(item);
                None
            }
        }
    }

    /// Remove and return the item of `kind`.
    pub fn remove(&mut self, kind: ItemKind) -> Option<Item> {
        let pos = self.items.iter().position(|i| i.kind == kind)?;
        Some(self.items.remove(pos))
    }

    /// Iterate over carried items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Returns true if no two items share a kind.
    pub fn is_unique_by_kind(&self) -> bool {
        self.items
            .iter()
            .enumerate()
            .all(|(n, a)| self.items[n + 1..].iter().all(|b| b.kind != a.kind))
    }

    #[cfg(test)]
    pub(crate) fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl std::fmt::Display for Inventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (n, item) in self.items.iter().enumerate() {
            if n > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "]")
    }
}
