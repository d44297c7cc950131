//! Journal entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tf_mechanics::{ClassKind, Item};

use crate::session::Outcome;

/// A single entry in the adventure journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JournalEntry {
    /// A session began.
    SessionStarted {
        /// The player's class.
        class: ClassKind,
        /// RNG seed of the run.
        seed: u64,
        /// When the session started.
        timestamp: DateTime<Utc>,
    },
    /// Health was restored.
    Healed {
        /// Health restored.
        amount: i32,
        /// Health afterwards.
        health: i32,
        /// When it happened.
        timestamp: DateTime<Utc>,
    },
    /// A found item was taken.
    ItemTaken {
        /// The item.
        item: Item,
        /// When it was taken.
        timestamp: DateTime<Utc>,
    },
    /// A found item was left behind.
    ItemLeft {
        /// The item.
        item: Item,
        /// When it was left.
        timestamp: DateTime<Utc>,
    },
    /// A checkpoint was stored.
    GameSaved {
        /// Description of the stored snapshot.
        snapshot: String,
        /// When it was stored.
        timestamp: DateTime<Utc>,
    },
    /// A battle ended with the monster dead.
    BattleWon {
        /// Monster class.
        monster: ClassKind,
        /// Victories after this battle.
        victories: u32,
        /// When the battle ended.
        timestamp: DateTime<Utc>,
    },
    /// A battle ended with the player dead.
    BattleLost {
        /// Monster class.
        monster: ClassKind,
        /// Whether the monster died too.
        mutual: bool,
        /// When the battle ended.
        timestamp: DateTime<Utc>,
    },
    /// The player retreated from a battle.
    BattleFled {
        /// Monster class.
        monster: ClassKind,
        /// When the player retreated.
        timestamp: DateTime<Utc>,
    },
    /// A checkpoint was loaded after a defeat.
    GameLoaded {
        /// Description of the restored snapshot.
        snapshot: String,
        /// When it was loaded.
        timestamp: DateTime<Utc>,
    },
    /// The session ended.
    SessionEnded {
        /// How it ended.
        outcome: Outcome,
        /// Total victories.
        victories: u32,
        /// When it ended.
        timestamp: DateTime<Utc>,
    },
}
