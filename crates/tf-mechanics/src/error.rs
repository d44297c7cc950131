//! Error types for the mechanics engine.

use crate::item::ItemKind;

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// No inventory entry of the requested kind exists.
    #[error("no {0} in inventory")]
    ItemNotFound(ItemKind),

    /// A weapon selection pointed past the end of the eligible weapons.
    #[error("weapon index {index} out of range ({len} eligible)")]
    WeaponIndexOutOfRange {
        /// The requested index (0-based).
        index: usize,
        /// How many weapons were eligible.
        len: usize,
    },

    /// A snapshot does not describe a state a combatant can be in.
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    /// A rating or stat range has its bounds reversed.
    #[error("invalid range: [{min}, {max}]")]
    InvalidRange {
        /// Lower bound.
        min: i32,
        /// Upper bound.
        max: i32,
    },

    /// A range allows values below what its rating can meaningfully take.
    #[error("range starting at {min} must not go below {floor}")]
    RangeBelowFloor {
        /// Lower bound of the range.
        min: i32,
        /// Smallest allowed lower bound.
        floor: i32,
    },
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
