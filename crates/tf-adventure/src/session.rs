//! Adventure session management.
//!
//! `AdventureSession` owns the player, the snapshot store, the RNG, the
//! journal and the victory counter, and lends them to one event handler
//! per turn until the player wins enough battles or dies.

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tf_mechanics::{ClassKind, Combatant, ItemFactory, ItemKind, SnapshotStore};

use crate::config::AdventureConfig;
use crate::decision::{DecisionProvider, Prompt};
use crate::error::AdventureResult;
use crate::event::{
    Event, EventContext, EventKind, EventMachine, Transition, TransitionTable, handler_for,
};
use crate::journal::{Journal, JournalEntry};
use crate::narration::{Narration, NarrationSink};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Enough battles were won.
    Victory,
    /// The player died and did not load a saved game.
    Defeat,
}

impl Outcome {
    /// Process exit code for this outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Victory => 0,
            Self::Defeat => 1,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Victory => write!(f, "Victory"),
            Self::Defeat => write!(f, "Defeat"),
        }
    }
}

/// Battles won in this session. Only ever goes up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VictoryCounter {
    count: u32,
}

impl VictoryCounter {
    /// Record a won battle. Returns the new total.
    pub fn increment(&mut self) -> u32 {
        self.count += 1;
        self.count
    }

    /// Battles won so far.
    pub fn count(&self) -> u32 {
        self.count
    }
}

/// A single play-through.
pub struct AdventureSession {
    config: AdventureConfig,
    player: Combatant,
    snapshots: SnapshotStore,
    rng: StdRng,
    machine: EventMachine,
    handlers: [Box<dyn Event>; 7],
    victories: VictoryCounter,
    journal: Journal,
    outcome: Option<Outcome>,
}

impl std::fmt::Debug for AdventureSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdventureSession")
            .field("class", &self.player.class_kind())
            .field("event", &self.machine.current())
            .field("victories", &self.victories.count())
            .field("outcome", &self.outcome)
            .finish()
    }
}

impl AdventureSession {
    /// Ask which class to play.
    pub fn choose_class(
        decisions: &mut dyn DecisionProvider,
        narration: &mut dyn NarrationSink,
    ) -> AdventureResult<ClassKind> {
        let prompt = Prompt::class_selection();
        let choice = prompt.check(decisions.choose(&prompt)?)?;
        let class = ClassKind::ALL[choice - 1];
        narration.notify(Narration::ClassChosen(class));
        Ok(class)
    }

    /// Start a session for a player of `class`.
    ///
    /// Every class starts with a standard sword equipped.
    pub fn new(class: ClassKind, config: AdventureConfig) -> AdventureResult<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);

        let mut player = Combatant::player(class, config.player_health, config.player_attack);
        let sword =
            ItemFactory::new(ItemKind::MeleeWeapon, &config.catalog, &mut rng).create_standard();
        player.add_item(sword, true);

        let table = TransitionTable::new(config.transition_weights)?;
        let machine = EventMachine::new(table, &mut rng);

        let mut journal = Journal::new();
        journal.append(JournalEntry::SessionStarted {
            class,
            seed: config.seed,
            timestamp: Utc::now(),
        });
        tracing::info!(
            target: "tf_adventure::session",
            %class,
            seed = config.seed,
            %sword,
            first = %machine.current(),
            "session started"
        );

        Ok(Self {
            config,
            player,
            snapshots: SnapshotStore::new(),
            rng,
            machine,
            handlers: EventKind::ALL.map(handler_for),
            victories: VictoryCounter::default(),
            journal,
            outcome: None,
        })
    }

    /// The player character.
    pub fn player(&self) -> &Combatant {
        &self.player
    }

    /// Saved checkpoints.
    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    /// Battles won so far.
    pub fn victories(&self) -> u32 {
        self.victories.count()
    }

    /// The run transcript.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// The event the next step will run.
    pub fn current_event(&self) -> EventKind {
        self.machine.current()
    }

    /// Session configuration.
    pub fn config(&self) -> &AdventureConfig {
        &self.config
    }

    /// How the session ended, once it has.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Run the current event once.
    ///
    /// Returns the outcome once the session is over; further calls keep
    /// returning it without doing anything.
    pub fn step(
        &mut self,
        decisions: &mut dyn DecisionProvider,
        narration: &mut dyn NarrationSink,
    ) -> AdventureResult<Option<Outcome>> {
        if let Some(outcome) = self.outcome {
            return Ok(Some(outcome));
        }
        if self.won() {
            return Ok(Some(self.finish(Outcome::Victory, narration)));
        }

        let kind = self.machine.current();
        tracing::debug!(target: "tf_adventure::session", event = %kind, "activating");
        let handler = &mut self.handlers[kind.index()];
        let mut ctx = EventContext {
            player: &mut self.player,
            snapshots: &mut self.snapshots,
            rng: &mut self.rng,
            decisions,
            narration: &mut *narration,
            victories: &mut self.victories,
            journal: &mut self.journal,
            config: &self.config,
            table: self.machine.table(),
        };
        let transition = handler.activate(&mut ctx)?;

        match transition {
            Transition::Next(next) => {
                self.machine.transition_to(next);
                if self.won() {
                    return Ok(Some(self.finish(Outcome::Victory, narration)));
                }
                Ok(None)
            }
            Transition::End(outcome) => Ok(Some(self.finish(outcome, narration))),
        }
    }

    /// Step until the session ends.
    pub fn run(
        &mut self,
        decisions: &mut dyn DecisionProvider,
        narration: &mut dyn NarrationSink,
    ) -> AdventureResult<Outcome> {
        loop {
            if let Some(outcome) = self.step(decisions, narration)? {
                return Ok(outcome);
            }
        }
    }

    fn won(&self) -> bool {
        self.victories.count() >= self.config.victories_to_win
    }

    fn finish(&mut self, outcome: Outcome, narration: &mut dyn NarrationSink) -> Outcome {
        if outcome == Outcome::Victory {
            narration.notify(Narration::Victory);
        }
        let victories = self.victories.count();
        self.journal.append(JournalEntry::SessionEnded {
            outcome,
            victories,
            timestamp: Utc::now(),
        });
        tracing::info!(
            target: "tf_adventure::session",
            %outcome,
            victories,
            turns = self.machine.transitions(),
            "session ended"
        );
        self.outcome = Some(outcome);
        outcome
    }
}
