//! The event state machine.
//!
//! Each turn the session activates the handler for the current
//! [`EventKind`]. The handler resolves the event against the player through
//! an [`EventContext`] and answers with a [`Transition`]: either the next
//! event or the end of the session.

pub mod battle;
pub mod find;
pub mod heal;

pub use battle::{BattleEvent, resolve_battle};
pub use find::{AmmunitionFindEvent, CheckpointFindEvent, WeaponFindEvent};
pub use heal::HealEvent;

use chrono::Utc;
use rand::Rng;
use rand::rngs::StdRng;
use tf_mechanics::{Combatant, ItemKind, SnapshotStore};

use crate::config::AdventureConfig;
use crate::decision::{DecisionProvider, PlayerStatus, Prompt};
use crate::error::{AdventureError, AdventureResult};
use crate::journal::{Journal, JournalEntry};
use crate::narration::{Narration, NarrationSink};
use crate::session::{Outcome, VictoryCounter};

/// Default next-event weights in [`EventKind::ALL`] order.
pub const DEFAULT_WEIGHTS: [u32; 7] = [20, 10, 10, 10, 10, 10, 30];

/// The kinds of event a turn can bring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Find and eat a healing item.
    Heal,
    /// Find a melee weapon.
    FindMelee,
    /// Find a ranged weapon.
    FindRanged,
    /// Find a spell focus.
    FindSpellFocus,
    /// Find ammunition.
    FindAmmunition,
    /// Find a checkpoint totem.
    FindCheckpoint,
    /// Meet a monster.
    Battle,
}

impl EventKind {
    /// All event kinds in table order.
    pub const ALL: [EventKind; 7] = [
        Self::Heal,
        Self::FindMelee,
        Self::FindRanged,
        Self::FindSpellFocus,
        Self::FindAmmunition,
        Self::FindCheckpoint,
        Self::Battle,
    ];

    /// Position in [`EventKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Heal => write!(f, "heal"),
            Self::FindMelee => write!(f, "find sword"),
            Self::FindRanged => write!(f, "find bow"),
            Self::FindSpellFocus => write!(f, "find spellbook"),
            Self::FindAmmunition => write!(f, "find arrows"),
            Self::FindCheckpoint => write!(f, "find totem"),
            Self::Battle => write!(f, "battle"),
        }
    }
}

/// Percentage weights for picking the next event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    weights: [u32; 7],
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
        }
    }
}

impl TransitionTable {
    /// Build a table, rejecting weights that do not sum to 100.
    pub fn new(weights: [u32; 7]) -> AdventureResult<Self> {
        let table = Self { weights };
        table.validate()?;
        Ok(table)
    }

    /// The weights in [`EventKind::ALL`] order.
    pub fn weights(&self) -> [u32; 7] {
        self.weights
    }

    /// Check that the weights sum to 100.
    pub fn validate(&self) -> AdventureResult<()> {
        let total: u32 = self.weights.iter().sum();
        if total != 100 {
            return Err(AdventureError::InvalidConfig(format!(
                "transition weights must sum to 100, got {total}"
            )));
        }
        Ok(())
    }

    /// Roll a d100 against the cumulative weights.
    pub fn roll(&self, rng: &mut StdRng) -> EventKind {
        let roll: u32 = rng.random_range(1..=100);
        let mut upper = 0;
        for (kind, weight) in EventKind::ALL.into_iter().zip(self.weights) {
            upper += weight;
            if roll <= upper {
                return kind;
            }
        }
        EventKind::Battle
    }

    /// Pick any event with equal chance.
    pub fn roll_uniform(&self, rng: &mut StdRng) -> EventKind {
        EventKind::ALL[rng.random_range(0..EventKind::ALL.len())]
    }
}

/// What happens after an event resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Continue with this event.
    Next(EventKind),
    /// Stop the session.
    End(Outcome),
}

/// Session state lent to one event handler for one activation.
pub struct EventContext<'a> {
    /// The player character.
    pub player: &'a mut Combatant,
    /// Saved checkpoints.
    pub snapshots: &'a mut SnapshotStore,
    /// Session RNG.
    pub rng: &'a mut StdRng,
    /// Where choices come from.
    pub decisions: &'a mut dyn DecisionProvider,
    /// Where narration goes.
    pub narration: &'a mut dyn NarrationSink,
    /// Battles won.
    pub victories: &'a mut VictoryCounter,
    /// Run transcript.
    pub journal: &'a mut Journal,
    /// Session configuration.
    pub config: &'a AdventureConfig,
    /// Next-event weights.
    pub table: &'a TransitionTable,
}

impl EventContext<'_> {
    /// Ask the decision provider and check the answer against the prompt.
    pub fn decide(&mut self, prompt: &Prompt) -> AdventureResult<usize> {
        let choice = self.decisions.choose(prompt)?;
        prompt.check(choice)
    }

    /// Emit narration.
    pub fn narrate(&mut self, message: Narration) {
        self.narration.notify(message);
    }

    /// Append a journal entry stamped with the current time.
    pub fn record(&mut self, entry: impl FnOnce(chrono::DateTime<Utc>) -> JournalEntry) {
        self.journal.append(entry(Utc::now()));
    }

    /// Roll the next event from the weighted table.
    pub fn roll_next(&mut self) -> EventKind {
        self.table.roll(self.rng)
    }

    /// The player's status line.
    pub fn status(&self) -> PlayerStatus {
        PlayerStatus {
            health: self.player.health(),
            attack: self.player.attack_power(),
            weapon: self.player.equipped_weapon(),
            victories: self.victories.count(),
            victories_to_win: self.config.victories_to_win,
        }
    }
}

/// A turn handler.
pub trait Event: std::fmt::Debug {
    /// The event kind this handler resolves.
    fn kind(&self) -> EventKind;

    /// Resolve the event and pick what comes next.
    fn activate(&mut self, ctx: &mut EventContext<'_>) -> AdventureResult<Transition>;
}

/// Build the handler for `kind`.
pub fn handler_for(kind: EventKind) -> Box<dyn Event> {
    match kind {
        EventKind::Heal => Box::new(HealEvent),
        EventKind::FindMelee => Box::new(WeaponFindEvent::new(ItemKind::MeleeWeapon)),
        EventKind::FindRanged => Box::new(WeaponFindEvent::new(ItemKind::RangedWeapon)),
        EventKind::FindSpellFocus => Box::new(WeaponFindEvent::new(ItemKind::SpellFocus)),
        EventKind::FindAmmunition => Box::new(AmmunitionFindEvent),
        EventKind::FindCheckpoint => Box::new(CheckpointFindEvent),
        EventKind::Battle => Box::new(BattleEvent),
    }
}

/// Tracks the active event.
#[derive(Debug, Clone)]
pub struct EventMachine {
    current: EventKind,
    table: TransitionTable,
    transitions: u64,
}

impl EventMachine {
    /// Start on a weighted roll from `table`.
    pub fn new(table: TransitionTable, rng: &mut StdRng) -> Self {
        let current = table.roll(rng);
        tracing::debug!(target: "tf_adventure::event", %current, "first event");
        Self {
            current,
            table,
            transitions: 0,
        }
    }

    /// The active event.
    pub fn current(&self) -> EventKind {
        self.current
    }

    /// The next-event weights.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Number of transitions taken so far.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Make `next` the active event.
    pub fn transition_to(&mut self, next: EventKind) {
        tracing::debug!(
            target: "tf_adventure::event",
            from = %self.current,
            to = %next,
            "transition"
        );
        self.current = next;
        self.transitions += 1;
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::ScriptedDecisions;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use tf_mechanics::ClassKind;

    #[test]
    fn kinds_in_table_order() {
        for (n, kind) in EventKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), n);
        }
        assert_eq!(EventKind::Battle.to_string(), "battle");
    }

    #[test]
    fn weights_must_sum_to_100() {
        assert!(TransitionTable::new(DEFAULT_WEIGHTS).is_ok());
        assert!(matches!(
            TransitionTable::new([0, 0, 0, 0, 0, 0, 99]),
            Err(AdventureError::InvalidConfig(_))
        ));
    }

    #[test]
    fn certain_table_always_picks_its_event() {
        let table = TransitionTable::new([0, 0, 0, 0, 0, 100, 0]).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            assert_eq!(table.roll(&mut rng), EventKind::FindCheckpoint);
        }
    }

    #[test]
    fn weighted_roll_follows_weights() {
        let table = TransitionTable::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0u32; 7];
        for _ in 0..10_000 {
            counts[table.roll(&mut rng).index()] += 1;
        }
        // Expect 2000 heals, 1000 per find, 3000 battles.
        assert!((1800..=2200).contains(&counts[0]), "{counts:?}");
        for count in &counts[1..6] {
            assert!((850..=1150).contains(count), "{counts:?}");
        }
        assert!((2750..=3250).contains(&counts[6]), "{counts:?}");
    }

    #[test]
    fn uniform_roll_reaches_every_event() {
        let table = TransitionTable::default();
        let mut rng = StdRng::seed_from_u64(8);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[table.roll_uniform(&mut rng).index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn machine_counts_transitions() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut machine = EventMachine::new(TransitionTable::default(), &mut rng);
        machine.transition_to(EventKind::Heal);
        machine.transition_to(EventKind::Battle);
        assert_eq!(machine.current(), EventKind::Battle);
        assert_eq!(machine.transitions(), 2);
    }

    #[test]
    fn handlers_match_their_kind() {
        for kind in EventKind::ALL {
            assert_eq!(handler_for(kind).kind(), kind);
        }
    }

    #[test]
    fn context_rejects_out_of_range_answers() {
        let mut h = testing::Harness::new(ClassKind::Melee, 1);
        let mut decisions = ScriptedDecisions::new([7]);
        let mut narration = Vec::new();
        let mut ctx = h.ctx(&mut decisions, &mut narration);
        assert!(matches!(
            ctx.decide(&Prompt::load_checkpoint()),
            Err(AdventureError::InvalidChoice { choice: 7, max: 2 })
        ));
    }

    proptest! {
        #[test]
        fn zero_weight_events_never_roll(seed in any::<u64>(), skip in 0usize..7) {
            let mut weights = [0u32; 7];
            let share = 100 / 6;
            let mut left = 100;
            let mut last = 0;
            for (n, w) in weights.iter_mut().enumerate() {
                if n != skip {
                    *w = share;
                    left -= share;
                    last = n;
                }
            }
            weights[last] += left;
            let table = TransitionTable::new(weights).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..100 {
                prop_assert_ne!(table.roll(&mut rng).index(), skip);
            }
        }
    }
}
