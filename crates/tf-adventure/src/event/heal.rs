//! The heal event: the player eats an apple.

use tf_mechanics::{ItemFactory, ItemKind};

use super::{Event, EventContext, EventKind, Transition};
use crate::error::AdventureResult;
use crate::journal::JournalEntry;
use crate::narration::Narration;

/// Restores health from a freshly rolled healing item.
///
/// Unlike the other events, the next event is drawn uniformly.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealEvent;

impl Event for HealEvent {
    fn kind(&self) -> EventKind {
        EventKind::Heal
    }

    fn activate(&mut self, ctx: &mut EventContext<'_>) -> AdventureResult<Transition> {
        let apple = ItemFactory::new(ItemKind::Healing, &ctx.config.catalog, ctx.rng)
            .create_standard();
        let amount = apple.value();
        let health = ctx.player.increase_health(amount);
        tracing::debug!(target: "tf_adventure::heal", amount, health, "healed");

        ctx.narrate(Narration::Healed { amount, health });
        ctx.record(|timestamp| JournalEntry::Healed {
            amount,
            health,
            timestamp,
        });
        Ok(Transition::Next(ctx.table.roll_uniform(ctx.rng)))
    }
}
