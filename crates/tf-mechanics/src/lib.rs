//! Combat and inventory mechanics for Totemfall.
//!
//! Provides the item catalog, the combatant model shared by players and
//! monsters, and the snapshot store that lets a defeated player roll back
//! to a saved state.

pub mod combatant;
pub mod error;
pub mod item;
pub mod snapshot;

pub use combatant::{ClassKind, Combatant, Inventory, Side, Strike};
pub use error::{MechError, MechResult};
pub use item::{CatalogConfig, Item, ItemFactory, ItemKind, Rating, RatingRange};
pub use snapshot::{Snapshot, SnapshotStore};
