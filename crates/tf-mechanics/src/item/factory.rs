//! Item factories with per-instance rolled ratings.
//!
//! A factory stands for one "drop": it rolls its standard and improved
//! ratings when it is built, and every item it mints afterwards carries
//! those same ratings.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::{Item, ItemKind, Rating};
use crate::error::{MechError, MechResult};

/// An inclusive `[min, max]` range that ratings and stats are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRange {
    /// Lowest value that can be rolled.
    pub min: i32,
    /// Highest value that can be rolled.
    pub max: i32,
}

impl RatingRange {
    /// Create a new range.
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Draw a value uniformly from the range.
    ///
    /// A reversed range collapses to `min`; use [`RatingRange::validate`]
    /// to reject it up front.
    pub fn roll(&self, rng: &mut StdRng) -> i32 {
        if self.max <= self.min {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }

    /// Whether `value` lies within the range.
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Reject ranges whose bounds are reversed.
    pub fn validate(&self) -> MechResult<()> {
        if self.min > self.max {
            return Err(MechError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Like [`RatingRange::validate`], and also reject a `min` below `floor`.
    pub fn validate_at_least(&self, floor: i32) -> MechResult<()> {
        self.validate()?;
        if self.min < floor {
            return Err(MechError::RangeBelowFloor {
                min: self.min,
                floor,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for RatingRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Rating ranges used by the item catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Damage range of standard-tier weapons.
    pub standard_weapon: RatingRange,
    /// Damage range of improved-tier weapons.
    pub improved_weapon: RatingRange,
    /// Healing range of healing items.
    pub healing: RatingRange,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            standard_weapon: RatingRange::new(5, 20),
            improved_weapon: RatingRange::new(20, 40),
            healing: RatingRange::new(3, 15),
        }
    }
}

impl CatalogConfig {
    /// Set the standard-tier weapon damage range.
    pub fn with_standard_weapon(mut self, range: RatingRange) -> Self {
        self.standard_weapon = range;
        self
    }

    /// Set the improved-tier weapon damage range.
    pub fn with_improved_weapon(mut self, range: RatingRange) -> Self {
        self.improved_weapon = range;
        self
    }

    /// Set the healing range.
    pub fn with_healing(mut self, range: RatingRange) -> Self {
        self.healing = range;
        self
    }

    /// Check every range. Weapons must deal damage and healing must not
    /// hurt.
    pub fn validate(&self) -> MechResult<()> {
        self.standard_weapon.validate_at_least(1)?;
        self.improved_weapon.validate_at_least(1)?;
        self.healing.validate_at_least(0)
    }
}

/// Mints items of one kind with ratings fixed at construction.
#[derive(Debug, Clone)]
pub struct ItemFactory {
    kind: ItemKind,
    standard: Rating,
    improved: Option<Rating>,
}

impl ItemFactory {
    /// Build a factory for `kind`, rolling its ratings from `config`.
    pub fn new(kind: ItemKind, config: &CatalogConfig, rng: &mut StdRng) -> Self {
        let (standard, improved) = match kind {
            ItemKind::MeleeWeapon | ItemKind::RangedWeapon | ItemKind::SpellFocus => {
                let standard = config.standard_weapon.roll(rng);
                let improved = config.improved_weapon.roll(rng);
                (Rating::Damage(standard), Some(Rating::Damage(improved)))
            }
            ItemKind::Healing => (Rating::Healing(config.healing.roll(rng)), None),
            ItemKind::Ammunition => (Rating::Damage(0), None),
            ItemKind::Checkpoint => (Rating::Resurrection, None),
        };
        Self {
            kind,
            standard,
            improved,
        }
    }

    /// The kind of item this factory mints.
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Mint a standard-tier item.
    pub fn create_standard(&self) -> Item {
        Item::new(self.kind, self.standard)
    }

    /// Mint an improved-tier item, if this kind has one.
    pub fn create_improved(&self) -> Option<Item> {
        self.improved.map(|rating| Item::new(self.kind, rating))
    }
}
