//! Configuration for an adventure run.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tf_mechanics::{CatalogConfig, RatingRange};

use crate::error::{AdventureError, AdventureResult};
use crate::event::{DEFAULT_WEIGHTS, TransitionTable};

/// Configuration for an adventure session.
///
/// Every field has a default, so a TOML file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdventureConfig {
    /// RNG seed for reproducible runs.
    pub seed: u64,
    /// Battles to win before the session ends in victory.
    pub victories_to_win: u32,
    /// Starting player health.
    pub player_health: i32,
    /// Starting player attack power, before the first weapon is equipped.
    pub player_attack: i32,
    /// Range monster health is drawn from.
    pub monster_health: RatingRange,
    /// Range monster attack power is drawn from.
    pub monster_attack: RatingRange,
    /// Percentage weights of the next event, in event order.
    pub transition_weights: [u32; 7],
    /// Chance that a class-affinity find is the improved item.
    pub improved_find_chance: f64,
    /// Item rating ranges.
    pub catalog: CatalogConfig,
}

impl Default for AdventureConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            victories_to_win: 10,
            player_health: 15,
            player_attack: 15,
            monster_health: RatingRange::new(10, 25),
            monster_attack: RatingRange::new(10, 30),
            transition_weights: DEFAULT_WEIGHTS,
            improved_find_chance: 0.6,
            catalog: CatalogConfig::default(),
        }
    }
}

impl AdventureConfig {
    /// Read and validate a TOML config file.
    pub fn from_path(path: &Path) -> AdventureResult<Self> {
        let data = std::fs::read_to_string(path)?;
        let cfg: AdventureConfig = toml::from_str(&data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of victories needed to win.
    pub fn with_victories_to_win(mut self, wins: u32) -> Self {
        self.victories_to_win = wins;
        self
    }

    /// Set the starting player health.
    pub fn with_player_health(mut self, health: i32) -> Self {
        self.player_health = health;
        self
    }

    /// Set the starting player attack power.
    pub fn with_player_attack(mut self, attack: i32) -> Self {
        self.player_attack = attack;
        self
    }

    /// Set the monster health range.
    pub fn with_monster_health(mut self, range: RatingRange) -> Self {
        self.monster_health = range;
        self
    }

    /// Set the monster attack range.
    pub fn with_monster_attack(mut self, range: RatingRange) -> Self {
        self.monster_attack = range;
        self
    }

    /// Set the next-event weights.
    pub fn with_transition_weights(mut self, weights: [u32; 7]) -> Self {
        self.transition_weights = weights;
        self
    }

    /// Set the improved-find chance (clamped to 0.0-1.0).
    pub fn with_improved_find_chance(mut self, chance: f64) -> Self {
        self.improved_find_chance = chance.clamp(0.0, 1.0);
        self
    }

    /// Set the item catalog ranges.
    pub fn with_catalog(mut self, catalog: CatalogConfig) -> Self {
        self.catalog = catalog;
        self
    }

    /// Check ranges, weights and probabilities.
    pub fn validate(&self) -> AdventureResult<()> {
        if self.player_health <= 0 {
            return Err(AdventureError::InvalidConfig(format!(
                "player_health must be positive, got {}",
                self.player_health
            )));
        }
        if !(0.0..=1.0).contains(&self.improved_find_chance) {
            return Err(AdventureError::InvalidConfig(format!(
                "improved_find_chance must be within 0.0-1.0, got {}",
                self.improved_find_chance
            )));
        }
        self.monster_health.validate()?;
        self.monster_attack.validate_at_least(0)?;
        if self.monster_health.min <= 0 {
            return Err(AdventureError::InvalidConfig(format!(
                "monster_health must be positive, got {}",
                self.monster_health
            )));
        }
        self.catalog.validate()?;
        TransitionTable::new(self.transition_weights)?;
        Ok(())
    }
}
