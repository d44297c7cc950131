//! Combatant snapshots and the undo stack.
//!
//! A [`Snapshot`] is an immutable capture of a combatant's mutable state.
//! The [`SnapshotStore`] keeps them in a stack and rolls a combatant back
//! to the newest one that still restores cleanly.

use serde::{Deserialize, Serialize};

use crate::combatant::{Combatant, Inventory};
use crate::error::{MechError, MechResult};
use crate::item::ItemKind;

/// Immutable capture of health, attack power, equipped weapon and inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    health: i32,
    attack_power: i32,
    equipped_weapon: Option<ItemKind>,
    inventory: Inventory,
}

impl Snapshot {
    /// Create a snapshot from its parts.
    pub fn new(
        health: i32,
        attack_power: i32,
        equipped_weapon: Option<ItemKind>,
        inventory: Inventory,
    ) -> Self {
        Self {
            health,
            attack_power,
            equipped_weapon,
            inventory,
        }
    }

    /// Captured health.
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Captured attack power.
    pub fn attack_power(&self) -> i32 {
        self.attack_power
    }

    /// Captured equipped weapon.
    pub fn equipped_weapon(&self) -> Option<ItemKind> {
        self.equipped_weapon
    }

    /// Captured inventory.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Check that the snapshot describes a reachable combatant state.
    pub fn validate(&self) -> MechResult<()> {
        if !self.inventory.is_unique_by_kind() {
            return Err(MechError::CorruptSnapshot(
                "inventory holds two items of one kind".to_string(),
            ));
        }
        if let Some(item) = self.inventory.iter().find(|i| !i.is_well_formed()) {
            return Err(MechError::CorruptSnapshot(format!(
                "malformed item {item:?}"
            )));
        }
        if let Some(kind) = self.equipped_weapon {
            if !kind.is_weapon() {
                return Err(MechError::CorruptSnapshot(format!(
                    "{kind} cannot be equipped"
                )));
            }
            let mismatched = self
                .inventory
                .get(kind)
                .filter(|item| item.value() != self.attack_power);
            if let Some(item) = mismatched {
                return Err(MechError::CorruptSnapshot(format!(
                    "attack {} does not match equipped {item}",
                    self.attack_power
                )));
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let weapon = self
            .equipped_weapon
            .map_or_else(|| "none".to_string(), |k| k.to_string());
        write!(
            f,
            "({}, {}, {weapon}, {})",
            self.health, self.attack_power, self.inventory
        )
    }
}

/// Append-only stack of snapshots for one session.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    snapshots: Vec<Snapshot>,
}

impl SnapshotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `originator` and push the snapshot.
    pub fn backup(&mut self, originator: &Combatant) -> &Snapshot {
        let snapshot = originator.save();
        tracing::info!(
            target: "tf_mechanics::snapshot",
            depth = self.snapshots.len() + 1,
            %snapshot,
            "game saved"
        );
        self.snapshots.push(snapshot);
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Roll `originator` back to the newest snapshot that restores cleanly.
    ///
    /// Snapshots that fail to restore are dropped with a warning. Returns
    /// the applied snapshot, or `None` when the store runs empty.
    pub fn undo(&mut self, originator: &mut Combatant) -> Option<Snapshot> {
        while let Some(snapshot) = self.snapshots.pop() {
            match originator.restore(&snapshot) {
                Ok(()) => {
                    tracing::info!(
                        target: "tf_mechanics::snapshot",
                        remaining = self.snapshots.len(),
                        %snapshot,
                        "restored"
                    );
                    return Some(snapshot);
                }
                Err(err) => {
                    tracing::warn!(
                        target: "tf_mechanics::snapshot",
                        %err,
                        "skipping snapshot"
                    );
                }
            }
        }
        tracing::debug!(target: "tf_mechanics::snapshot", "nothing to undo");
        None
    }

    /// Descriptions of stored snapshots, oldest first.
    pub fn history(&self) -> impl Iterator<Item = String> + '_ {
        self.snapshots.iter().map(Snapshot::to_string)
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The newest snapshot.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }
}
