//! Turn-based adventure engine for Totemfall.
//!
//! Provides the weighted event state machine, the event handlers (healing,
//! item finds, checkpoint totems, battles), the session driver that owns
//! the player for a run, the decision and narration boundaries a front end
//! plugs into, and a journal of what happened.

pub mod config;
pub mod decision;
pub mod error;
pub mod event;
pub mod journal;
pub mod narration;
pub mod session;

pub use config::AdventureConfig;
pub use decision::{
    DecisionProvider, FnDecisions, PlayerStatus, Prompt, PromptKind, ScriptedDecisions,
};
pub use error::{AdventureError, AdventureResult};
pub use event::{EventKind, EventMachine, Transition, TransitionTable};
pub use journal::{Journal, JournalEntry};
pub use narration::{Narration, NarrationSink};
pub use session::{AdventureSession, Outcome, VictoryCounter};
