//! Item kinds, ratings, and the item catalog.
//!
//! Items are small immutable values. Two items of the same [`ItemKind`]
//! occupy the same inventory slot; display names are only used for
//! presentation.

pub mod factory;

pub use factory::{CatalogConfig, ItemFactory, RatingRange};

use serde::{Deserialize, Serialize};

/// The category an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// A close-combat weapon (sword).
    MeleeWeapon,
    /// A ranged weapon (bow). Only usable while ammunition is carried.
    RangedWeapon,
    /// Ammunition for ranged weapons (arrows).
    Ammunition,
    /// A spell focus (spellbook).
    SpellFocus,
    /// A healing item (apple).
    Healing,
    /// A checkpoint charm (totem) that allows one rollback after defeat.
    Checkpoint,
}

impl ItemKind {
    /// All item kinds in catalog order.
    pub const ALL: [ItemKind; 6] = [
        Self::MeleeWeapon,
        Self::RangedWeapon,
        Self::Ammunition,
        Self::SpellFocus,
        Self::Healing,
        Self::Checkpoint,
    ];

    /// Returns true for kinds that can be wielded as the active weapon.
    pub fn is_weapon(self) -> bool {
        matches!(
            self,
            Self::MeleeWeapon | Self::RangedWeapon | Self::SpellFocus
        )
    }

    /// Returns true if the catalog mints an improved tier for this kind.
    pub fn has_improved_tier(self) -> bool {
        self.is_weapon()
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MeleeWeapon => write!(f, "sword"),
            Self::RangedWeapon => write!(f, "bow"),
            Self::Ammunition => write!(f, "arrows"),
            Self::SpellFocus => write!(f, "spellbook"),
            Self::Healing => write!(f, "apple"),
            Self::Checkpoint => write!(f, "totem"),
        }
    }
}

/// What an item is worth: damage, healing, or the resurrection marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    /// Damage dealt when wielded. Zero for ammunition.
    Damage(i32),
    /// Health restored when consumed.
    Healing(i32),
    /// The checkpoint charm's rollback capability.
    Resurrection,
}

impl Rating {
    /// The integer value of this rating (0 for the resurrection marker).
    pub fn value(self) -> i32 {
        match self {
            Self::Damage(n) | Self::Healing(n) => n,
            Self::Resurrection => 0,
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Damage(n) => write!(f, "attack {n}"),
            Self::Healing(n) => write!(f, "heals {n}"),
            Self::Resurrection => write!(f, "resurrection"),
        }
    }
}

/// An item that can be found, carried, and used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// The item's category. Inventory slots are keyed by this.
    pub kind: ItemKind,
    /// Damage, healing, or resurrection rating.
    pub rating: Rating,
}

impl Item {
    /// Create an item from a kind and a rating.
    pub fn new(kind: ItemKind, rating: Rating) -> Self {
        Self { kind, rating }
    }

    /// Create a weapon (or spell focus) with the given damage.
    pub fn weapon(kind: ItemKind, damage: i32) -> Self {
        Self::new(kind, Rating::Damage(damage))
    }

    /// Create a bundle of ammunition.
    pub fn ammunition() -> Self {
        Self::new(ItemKind::Ammunition, Rating::Damage(0))
    }

    /// Create a checkpoint charm.
    pub fn checkpoint() -> Self {
        Self::new(ItemKind::Checkpoint, Rating::Resurrection)
    }

    /// The integer value of the item's rating.
    pub fn value(&self) -> i32 {
        self.rating.value()
    }

    /// Whether the rating variant fits the kind (e.g. no healing swords).
    pub fn is_well_formed(&self) -> bool {
        match self.kind {
            ItemKind::MeleeWeapon | ItemKind::RangedWeapon | ItemKind::SpellFocus => {
                matches!(self.rating, Rating::Damage(_))
            }
            ItemKind::Ammunition => self.rating == Rating::Damage(0),
            ItemKind::Healing => matches!(self.rating, Rating::Healing(_)),
            ItemKind::Checkpoint => self.rating == Rating::Resurrection,
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.rating {
            Rating::Damage(n) => write!(f, "{}: {n}", self.kind),
            Rating::Healing(n) => write!(f, "{}: +{n}", self.kind),
            Rating::Resurrection => write!(f, "{}: resurrection", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weapon_kinds() {
        assert!(ItemKind::MeleeWeapon.is_weapon());
        assert!(ItemKind::RangedWeapon.is_weapon());
        assert!(ItemKind::SpellFocus.is_weapon());
        assert!(!ItemKind::Ammunition.is_weapon());
        assert!(!ItemKind::Healing.is_weapon());
        assert!(!ItemKind::Checkpoint.is_weapon());
    }

    #[test]
    fn rating_values() {
        assert_eq!(Rating::Damage(12).value(), 12);
        assert_eq!(Rating::Healing(4).value(), 4);
        assert_eq!(Rating::Resurrection.value(), 0);
    }

    #[test]
    fn kind_display() {
        assert_eq!(ItemKind::MeleeWeapon.to_string(), "sword");
        assert_eq!(ItemKind::RangedWeapon.to_string(), "bow");
        assert_eq!(ItemKind::Ammunition.to_string(), "arrows");
        assert_eq!(ItemKind::SpellFocus.to_string(), "spellbook");
        assert_eq!(ItemKind::Healing.to_string(), "apple");
        assert_eq!(ItemKind::Checkpoint.to_string(), "totem");
    }

    #[test]
    fn item_display() {
        insta::assert_snapshot!(Item::weapon(ItemKind::MeleeWeapon, 17).to_string(), @"sword: 17");
        assert_eq!(Item::checkpoint().to_string(), "totem: resurrection");
        assert_eq!(
            Item::new(ItemKind::Healing, Rating::Healing(5)).to_string(),
            "apple: +5"
        );
    }

    #[test]
    fn well_formed_items() {
        assert!(Item::ammunition().is_well_formed());
        assert!(Item::checkpoint().is_well_formed());
        assert!(Item::weapon(ItemKind::SpellFocus, 9).is_well_formed());
        assert!(!Item::new(ItemKind::MeleeWeapon, Rating::Healing(3)).is_well_formed());
        assert!(!Item::new(ItemKind::Ammunition, Rating::Damage(4)).is_well_formed());
    }

    #[test]
    fn item_serde_roundtrip() {
        let item = Item::weapon(ItemKind::RangedWeapon, 22);
        let json = serde_json::to_string(&item).unwrap();
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
