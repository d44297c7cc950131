//! The battle event.
//!
//! A battle is a loop of exchanges: the player strikes, then the monster
//! strikes back, even if it was just killed. Between exchanges the player
//! may keep fighting, retreat, or change weapon. A defeated player holding
//! a totem may load the last saved game instead of ending the session.

use tf_mechanics::{ClassKind, Combatant, ItemKind};

use super::{Event, EventContext, EventKind, Transition};
use crate::decision::Prompt;
use crate::error::AdventureResult;
use crate::journal::JournalEntry;
use crate::narration::Narration;
use crate::session::Outcome;

const ATTACK: usize = 1;
const RETREAT: usize = 2;
const LOAD: usize = 1;

/// Meets a randomly rolled monster.
#[derive(Debug, Clone, Copy, Default)]
pub struct BattleEvent;

impl Event for BattleEvent {
    fn kind(&self) -> EventKind {
        EventKind::Battle
    }

    fn activate(&mut self, ctx: &mut EventContext<'_>) -> AdventureResult<Transition> {
        let next = ctx.roll_next();
        let class = ClassKind::random(ctx.rng);
        let health = ctx.config.monster_health.roll(ctx.rng);
        let attack = ctx.config.monster_attack.roll(ctx.rng);
        resolve_battle(ctx, Combatant::monster(class, health, attack), next)
    }
}

/// Fight `monster` to a conclusion, then continue with `next`.
///
/// Returns [`Transition::End`] only when the player dies and does not
/// load a saved game.
pub fn resolve_battle(
    ctx: &mut EventContext<'_>,
    mut monster: Combatant,
    next: EventKind,
) -> AdventureResult<Transition> {
    let monster_class = monster.class_kind();
    tracing::info!(
        target: "tf_adventure::battle",
        monster = %monster_class,
        health = monster.health(),
        attack = monster.attack_power(),
        "battle started"
    );
    ctx.narrate(Narration::MonsterEncountered {
        class: monster_class,
        health: monster.health(),
        attack: monster.attack_power(),
    });

    loop {
        if !choose_to_fight(ctx, &monster)? {
            tracing::info!(target: "tf_adventure::battle", "player retreated");
            ctx.narrate(Narration::Retreated);
            ctx.record(|timestamp| JournalEntry::BattleFled {
                monster: monster_class,
                timestamp,
            });
            return Ok(Transition::Next(next));
        }

        exchange(ctx, &mut monster);

        if !ctx.player.is_alive() || !monster.is_alive() {
            break;
        }
        ctx.narrate(Narration::MonsterWounded {
            health: monster.health(),
            attack: monster.attack_power(),
        });
    }

    if ctx.player.is_alive() {
        let victories = ctx.victories.increment();
        tracing::info!(target: "tf_adventure::battle", victories, "monster slain");
        ctx.narrate(Narration::MonsterSlain { victories });
        ctx.record(|timestamp| JournalEntry::BattleWon {
            monster: monster_class,
            victories,
            timestamp,
        });
        return Ok(Transition::Next(next));
    }

    let mutual = !monster.is_alive();
    defeat(ctx, monster_class, mutual, next)
}

/// Player strikes first, then the monster answers.
fn exchange(ctx: &mut EventContext<'_>, monster: &mut Combatant) {
    let dealt = monster.receive_attack(ctx.player, ctx.rng);
    let taken = ctx.player.receive_attack(monster, ctx.rng);
    tracing::debug!(
        target: "tf_adventure::battle",
        dealt = dealt.damage,
        monster_health = dealt.health,
        taken = taken.damage,
        dodged = taken.dodged,
        player_health = taken.health,
        "exchange"
    );
    if taken.dodged {
        ctx.narrate(Narration::Dodged);
    } else {
        ctx.narrate(Narration::PlayerWounded {
            damage: taken.damage,
            health: taken.health,
        });
    }
}

/// Offer the battle choice. Returns false on retreat.
fn choose_to_fight(ctx: &mut EventContext<'_>, monster: &Combatant) -> AdventureResult<bool> {
    let prompt = Prompt::battle(ctx.status(), monster);
    match ctx.decide(&prompt)? {
        ATTACK => Ok(true),
        RETREAT => Ok(false),
        _ => {
            let eligible = ctx.player.eligible_weapons();
            if !eligible.is_empty() {
                let choice = ctx.decide(&Prompt::select_weapon(&eligible))?;
                let weapon = ctx.player.select_weapon(choice - 1)?;
                tracing::debug!(target: "tf_adventure::battle", %weapon, "weapon changed");
                ctx.narrate(Narration::WeaponEquipped(weapon));
            }
            let prompt = Prompt::battle_after_reweapon(ctx.status(), monster);
            Ok(ctx.decide(&prompt)? == ATTACK)
        }
    }
}

/// The player has died. Load the saved game if a totem is held and the
/// player wants to, otherwise end the session.
fn defeat(
    ctx: &mut EventContext<'_>,
    monster: ClassKind,
    mutual: bool,
    next: EventKind,
) -> AdventureResult<Transition> {
    tracing::info!(target: "tf_adventure::battle", mutual, "player defeated");
    ctx.narrate(if mutual {
        Narration::MutualDestruction
    } else {
        Narration::Defeat
    });
    ctx.record(|timestamp| JournalEntry::BattleLost {
        monster,
        mutual,
        timestamp,
    });

    if !ctx.player.has_item(ItemKind::Checkpoint) {
        return Ok(Transition::End(Outcome::Defeat));
    }
    if ctx.decide(&Prompt::load_checkpoint())? != LOAD {
        return Ok(Transition::End(Outcome::Defeat));
    }

    let Some(snapshot) = ctx.snapshots.undo(ctx.player) else {
        tracing::warn!(target: "tf_adventure::battle", "totem held but no saved game");
        return Ok(Transition::End(Outcome::Defeat));
    };
    if ctx.player.has_item(ItemKind::Checkpoint) {
        ctx.player.remove_item(ItemKind::Checkpoint)?;
    }
    let health = ctx.player.health();
    ctx.narrate(Narration::GameLoaded { health });
    let snapshot = snapshot.to_string();
    ctx.record(|timestamp| JournalEntry::GameLoaded {
        snapshot,
        timestamp,
    });
    Ok(Transition::Next(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::{FnDecisions, PromptKind, ScriptedDecisions};
    use crate::error::AdventureError;
    use crate::event::testing::Harness;
    use tf_mechanics::Item;

    fn fight(
        h: &mut Harness,
        monster: Combatant,
        answers: impl IntoIterator<Item = usize>,
    ) -> (AdventureResult<Transition>, Vec<Narration>) {
        let mut decisions = ScriptedDecisions::new(answers);
        let mut narration = Vec::new();
        let result = resolve_battle(
            &mut h.ctx(&mut decisions, &mut narration),
            monster,
            EventKind::Heal,
        );
        (result, narration)
    }

    #[test]
    fn one_blow_victory() {
        let mut h = Harness::new(ClassKind::Melee, 42);
        let monster = Combatant::monster(ClassKind::Ranged, 12, 5);
        let (result, narration) = fight(&mut h, monster, [1]);

        assert_eq!(result.unwrap(), Transition::Next(EventKind::Heal));
        assert_eq!(h.victories.count(), 1);
        assert_eq!(h.player.health(), 10);
        assert_eq!(
            narration.last(),
            Some(&Narration::MonsterSlain { victories: 1 })
        );
    }

    #[test]
    fn exchange_overkills_monster() {
        let mut h = Harness::new(ClassKind::Melee, 42);
        let mut monster = Combatant::monster(ClassKind::Ranged, 12, 5);
        let mut decisions = ScriptedDecisions::default();
        let mut narration = Vec::new();
        exchange(&mut h.ctx(&mut decisions, &mut narration), &mut monster);
        assert_eq!(monster.health(), -3);
        assert_eq!(h.player.health(), 10);
        assert_eq!(
            narration,
            vec![Narration::PlayerWounded {
                damage: 5,
                health: 10
            }]
        );
    }

    #[test]
    fn weighted_next_event_after_victory() {
        let mut h = Harness::new(ClassKind::Melee, 42);
        let mut decisions = ScriptedDecisions::new([1]);
        let mut narration = Vec::new();
        let mut ctx = h.ctx(&mut decisions, &mut narration);
        let next = ctx.roll_next();
        let t = resolve_battle(&mut ctx, Combatant::monster(ClassKind::Ranged, 12, 5), next)
            .unwrap();
        assert_eq!(t, Transition::Next(next));
    }

    #[test]
    fn monster_strikes_back_when_dying() {
        let mut h = Harness::new(ClassKind::Melee, 42);
        let monster = Combatant::monster(ClassKind::Caster, 10, 20);
        let (result, narration) = fight(&mut h, monster, [1]);

        assert_eq!(result.unwrap(), Transition::End(Outcome::Defeat));
        assert!(narration.contains(&Narration::MutualDestruction));
        assert_eq!(h.victories.count(), 0);
    }

    #[test]
    fn plain_defeat_without_totem_ends() {
        let mut h = Harness::new(ClassKind::Melee, 42);
        let monster = Combatant::monster(ClassKind::Caster, 40, 20);
        let (result, narration) = fight(&mut h, monster, [1]);
        assert_eq!(result.unwrap(), Transition::End(Outcome::Defeat));
        assert!(narration.contains(&Narration::Defeat));
    }

    #[test]
    fn retreat_skips_combat() {
        let mut h = Harness::new(ClassKind::Melee, 42);
        let monster = Combatant::monster(ClassKind::Caster, 40, 20);
        let (result, narration) = fight(&mut h, monster, [2]);
        assert_eq!(result.unwrap(), Transition::Next(EventKind::Heal));
        assert_eq!(h.player.health(), 15);
        assert_eq!(narration.last(), Some(&Narration::Retreated));
    }

    #[test]
    fn retreat_mid_battle_abandons_monster() {
        let mut h = Harness::new(ClassKind::Melee, 42);
        let monster = Combatant::monster(ClassKind::Caster, 40, 4);
        let (result, narration) = fight(&mut h, monster, [1, 2]);
        assert_eq!(result.unwrap(), Transition::Next(EventKind::Heal));
        assert_eq!(h.player.health(), 11);
        assert_eq!(h.victories.count(), 0);
        assert!(narration.contains(&Narration::MonsterWounded {
            health: 25,
            attack: 4
        }));
    }

    #[test]
    fn change_weapon_then_attack() {
        let mut h = Harness::new(ClassKind::Melee, 42);
        h.player
            .add_item(Item::weapon(ItemKind::SpellFocus, 40), false);
        let monster = Combatant::monster(ClassKind::Caster, 35, 5);
        let (result, narration) = fight(&mut h, monster, [3, 2, 1]);

        assert_eq!(result.unwrap(), Transition::Next(EventKind::Heal));
        assert_eq!(h.player.equipped_weapon(), Some(ItemKind::SpellFocus));
        assert_eq!(h.victories.count(), 1);
        assert!(narration.contains(&Narration::WeaponEquipped(Item::weapon(
            ItemKind::SpellFocus,
            40
        ))));
    }

    #[test]
    fn change_weapon_then_retreat() {
        let mut h = Harness::new(ClassKind::Melee, 42);
        let monster = Combatant::monster(ClassKind::Caster, 35, 5);
        let (result, _) = fight(&mut h, monster, [3, 1, 2]);
        assert_eq!(result.unwrap(), Transition::Next(EventKind::Heal));
        assert_eq!(h.player.health(), 15);
    }

    #[test]
    fn prompts_follow_the_battle_flow() {
        let mut h = Harness::new(ClassKind::Melee, 42);
        let mut asked = Vec::new();
        let mut decisions = FnDecisions(|p: &Prompt| -> AdventureResult<usize> {
            asked.push(p.kind());
            Ok(if p.kind() == PromptKind::Battle { 3 } else { 1 })
        });
        let mut narration = Vec::new();
        resolve_battle(
            &mut h.ctx(&mut decisions, &mut narration),
            Combatant::monster(ClassKind::Ranged, 12, 5),
            EventKind::Heal,
        )
        .unwrap();
        assert_eq!(
            asked,
            vec![
                PromptKind::Battle,
                PromptKind::SelectWeapon,
                PromptKind::BattleAfterReweapon
            ]
        );
    }

    #[test]
    fn totem_reload_restores_and_consumes() {
        let mut h = Harness::new(ClassKind::Melee, 42);
        h.player.add_item(Item::checkpoint(), false);
        h.snapshots.backup(&h.player);
        let monster = Combatant::monster(ClassKind::Caster, 40, 20);
        let (result, narration) = fight(&mut h, monster, [1, 1]);

        assert_eq!(result.unwrap(), Transition::Next(EventKind::Heal));
        assert_eq!(h.player.health(), 15);
        assert!(!h.player.has_item(ItemKind::Checkpoint));
        assert!(h.snapshots.is_empty());
        assert_eq!(h.victories.count(), 0);
        assert_eq!(narration.last(), Some(&Narration::GameLoaded { health: 15 }));
    }

    #[test]
    fn totem_reload_after_mutual_destruction() {
        let mut h = Harness::new(ClassKind::Melee, 42);
        h.player.add_item(Item::checkpoint(), false);
        h.snapshots.backup(&h.player);
        let monster = Combatant::monster(ClassKind::Caster, 10, 20);
        let (result, narration) = fight(&mut h, monster, [1, 1]);

        assert_eq!(result.unwrap(), Transition::Next(EventKind::Heal));
        assert!(narration.contains(&Narration::MutualDestruction));
        assert_eq!(h.player.health(), 15);
        assert!(!h.player.has_item(ItemKind::Checkpoint));
        assert_eq!(h.victories.count(), 0);
        assert_eq!(narration.last(), Some(&Narration::GameLoaded { health: 15 }));
    }

    #[test]
    fn totem_declined_ends() {
        let mut h = Harness::new(ClassKind::Melee, 42);
        h.player.add_item(Item::checkpoint(), false);
        h.snapshots.backup(&h.player);
        let monster = Combatant::monster(ClassKind::Caster, 10, 20);
        let (result, _) = fight(&mut h, monster, [1, 2]);
        assert_eq!(result.unwrap(), Transition::End(Outcome::Defeat));
        assert_eq!(h.snapshots.len(), 1);
    }

    #[test]
    fn totem_without_save_ends() {
        let mut h = Harness::new(ClassKind::Melee, 42);
        h.player.add_item(Item::checkpoint(), false);
        let monster = Combatant::monster(ClassKind::Caster, 40, 20);
        let (result, _) = fight(&mut h, monster, [1, 1]);
        assert_eq!(result.unwrap(), Transition::End(Outcome::Defeat));
    }

    #[test]
    fn out_of_range_weapon_choice_is_an_error() {
        let mut h = Harness::new(ClassKind::Melee, 42);
        let monster = Combatant::monster(ClassKind::Caster, 40, 1);
        let (result, _) = fight(&mut h, monster, [3, 2]);
        assert!(matches!(
            result,
            Err(AdventureError::InvalidChoice { choice: 2, max: 1 })
        ));
    }

    #[test]
    fn battle_event_rolls_monster_in_range() {
        let mut h = Harness::new(ClassKind::Melee, 42);
        let mut decisions = ScriptedDecisions::new([2]);
        let mut narration = Vec::new();
        BattleEvent
            .activate(&mut h.ctx(&mut decisions, &mut narration))
            .unwrap();
        match narration[0] {
            Narration::MonsterEncountered { health, attack, .. } => {
                assert!((10..=25).contains(&health));
                assert!((10..=30).contains(&attack));
            }
            ref other => panic!("unexpected narration {other:?}"),
        }
    }
}
