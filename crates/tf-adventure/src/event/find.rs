//! Find events: weapons, ammunition and checkpoint totems.
//!
//! Every find pre-rolls the next event before anything is offered and
//! always moves on to it, whether the item was taken or not.

use rand::Rng;
use tf_mechanics::{Item, ItemFactory, ItemKind};

use super::{Event, EventContext, EventKind, Transition};
use crate::decision::Prompt;
use crate::error::AdventureResult;
use crate::journal::JournalEntry;
use crate::narration::Narration;

const TAKE: usize = 1;

/// Finds a weapon of one kind: sword, bow, or spellbook.
///
/// A player whose class favors this kind may find the improved tier.
#[derive(Debug, Clone, Copy)]
pub struct WeaponFindEvent {
    item_kind: ItemKind,
}

impl WeaponFindEvent {
    /// Create a find event for `item_kind`.
    pub fn new(item_kind: ItemKind) -> Self {
        Self { item_kind }
    }

    /// The kind of weapon found.
    pub fn item_kind(&self) -> ItemKind {
        self.item_kind
    }
}

impl Event for WeaponFindEvent {
    fn kind(&self) -> EventKind {
        match self.item_kind {
            ItemKind::RangedWeapon => EventKind::FindRanged,
            ItemKind::SpellFocus => EventKind::FindSpellFocus,
            _ => EventKind::FindMelee,
        }
    }

    fn activate(&mut self, ctx: &mut EventContext<'_>) -> AdventureResult<Transition> {
        let next = ctx.roll_next();
        let factory = ItemFactory::new(self.item_kind, &ctx.config.catalog, ctx.rng);
        let favored = ctx.player.class_kind().affinity() == self.item_kind;
        let improved = favored && ctx.rng.random_bool(ctx.config.improved_find_chance);
        let item = if improved {
            factory
                .create_improved()
                .unwrap_or_else(|| factory.create_standard())
        } else {
            factory.create_standard()
        };
        tracing::debug!(target: "tf_adventure::find", %item, improved, "weapon found");

        offer_item(ctx, item)?;
        Ok(Transition::Next(next))
    }
}

/// Finds a quiver of arrows.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmmunitionFindEvent;

impl Event for AmmunitionFindEvent {
    fn kind(&self) -> EventKind {
        EventKind::FindAmmunition
    }

    fn activate(&mut self, ctx: &mut EventContext<'_>) -> AdventureResult<Transition> {
        let next = ctx.roll_next();
        let arrows = ItemFactory::new(ItemKind::Ammunition, &ctx.config.catalog, ctx.rng)
            .create_standard();
        offer_item(ctx, arrows)?;
        Ok(Transition::Next(next))
    }
}

/// Finds a magic totem. Taking it saves the game.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckpointFindEvent;

impl Event for CheckpointFindEvent {
    fn kind(&self) -> EventKind {
        EventKind::FindCheckpoint
    }

    fn activate(&mut self, ctx: &mut EventContext<'_>) -> AdventureResult<Transition> {
        let next = ctx.roll_next();
        let totem = ItemFactory::new(ItemKind::Checkpoint, &ctx.config.catalog, ctx.rng)
            .create_standard();
        ctx.narrate(Narration::ItemFound(totem));

        let prompt = Prompt::take_checkpoint(ctx.player.inventory().iter().copied().collect());
        if ctx.decide(&prompt)? == TAKE {
            ctx.player.add_item(totem, false);
            let snapshot = ctx.snapshots.backup(ctx.player).to_string();
            ctx.narrate(Narration::GameSaved);
            ctx.record(|timestamp| JournalEntry::GameSaved {
                snapshot,
                timestamp,
            });
        } else {
            ctx.narrate(Narration::ItemLeft(totem));
            ctx.record(|timestamp| JournalEntry::ItemLeft {
                item: totem,
                timestamp,
            });
        }
        Ok(Transition::Next(next))
    }
}

/// Show `item` with the inventory and add it if the player takes it.
fn offer_item(ctx: &mut EventContext<'_>, item: Item) -> AdventureResult<bool> {
    ctx.narrate(Narration::ItemFound(item));
    let prompt = Prompt::take_item(&item, ctx.player.inventory().iter().copied().collect());
    if ctx.decide(&prompt)? == TAKE {
        ctx.player.add_item(item, false);
        tracing::info!(target: "tf_adventure::find", %item, "item taken");
        ctx.narrate(Narration::ItemTaken(item));
        ctx.record(|timestamp| JournalEntry::ItemTaken { item, timestamp });
        Ok(true)
    } else {
        ctx.narrate(Narration::ItemLeft(item));
        ctx.record(|timestamp| JournalEntry::ItemLeft { item, timestamp });
        Ok(false)
    }
}
