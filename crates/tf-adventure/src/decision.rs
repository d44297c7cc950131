//! The decision boundary: prompts offered to the player and the providers
//! that answer them.
//!
//! The engine blocks on a [`DecisionProvider`] at every choice point. A
//! provider returns a 1-based option number; the engine re-checks it with
//! [`Prompt::check`] so a misbehaving provider surfaces as
//! [`AdventureError::InvalidChoice`] instead of a wrong branch.

use std::collections::VecDeque;

use tf_mechanics::{ClassKind, Combatant, Item, ItemKind};

use crate::error::{AdventureError, AdventureResult};

/// What a prompt is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Pick the character class.
    ClassSelection,
    /// Take or leave a found item.
    TakeItem,
    /// Take or leave a checkpoint totem.
    TakeCheckpoint,
    /// Attack, retreat, or change weapon.
    Battle,
    /// Attack or retreat after changing weapon.
    BattleAfterReweapon,
    /// Pick one of the eligible weapons.
    SelectWeapon,
    /// Use the totem to load the saved game after a defeat.
    LoadCheckpoint,
}

/// Snapshot of the player shown alongside battle prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStatus {
    /// Current health.
    pub health: i32,
    /// Current attack power.
    pub attack: i32,
    /// Equipped weapon kind.
    pub weapon: Option<ItemKind>,
    /// Battles won so far.
    pub victories: u32,
    /// Battles needed to win.
    pub victories_to_win: u32,
}

impl std::fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let weapon = self
            .weapon
            .map_or_else(|| "bare hands".to_string(), |k| k.to_string());
        write!(
            f,
            "health {} | {weapon} | attack {} | victories {}/{}",
            self.health, self.attack, self.victories, self.victories_to_win
        )
    }
}

/// A question put to the decision provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    kind: PromptKind,
    heading: String,
    options: Vec<String>,
    inventory: Vec<Item>,
    status: Option<PlayerStatus>,
}

impl Prompt {
    /// Create a prompt with the given option labels.
    pub fn new(kind: PromptKind, heading: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            kind,
            heading: heading.into(),
            options,
            inventory: Vec::new(),
            status: None,
        }
    }

    /// Attach the player's inventory listing.
    pub fn with_inventory(mut self, inventory: Vec<Item>) -> Self {
        self.inventory = inventory;
        self
    }

    /// Attach a player status line.
    pub fn with_status(mut self, status: PlayerStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Character class selection.
    pub fn class_selection() -> Self {
        let options = ClassKind::ALL.iter().map(ToString::to_string).collect();
        Self::new(PromptKind::ClassSelection, "Choose your class", options)
    }

    /// Take or leave `item`.
    pub fn take_item(item: &Item, inventory: Vec<Item>) -> Self {
        Self::new(
            PromptKind::TakeItem,
            format!("Take the {item}?"),
            labels(&["Take", "Leave"]),
        )
        .with_inventory(inventory)
    }

    /// Take or leave a checkpoint totem.
    pub fn take_checkpoint(inventory: Vec<Item>) -> Self {
        Self::new(
            PromptKind::TakeCheckpoint,
            "Take the magic totem? Taking it saves the game.",
            labels(&["Take", "Leave"]),
        )
        .with_inventory(inventory)
    }

    /// The main battle choice against `monster`.
    pub fn battle(status: PlayerStatus, monster: &Combatant) -> Self {
        Self::new(
            PromptKind::Battle,
            monster_heading(monster),
            labels(&["Attack", "Retreat", "Change weapon"]),
        )
        .with_status(status)
    }

    /// The forced attack-or-retreat choice after changing weapon.
    pub fn battle_after_reweapon(status: PlayerStatus, monster: &Combatant) -> Self {
        Self::new(
            PromptKind::BattleAfterReweapon,
            monster_heading(monster),
            labels(&["Attack", "Retreat"]),
        )
        .with_status(status)
    }

    /// Pick one of `weapons`.
    pub fn select_weapon(weapons: &[Item]) -> Self {
        let options = weapons.iter().map(ToString::to_string).collect();
        Self::new(PromptKind::SelectWeapon, "Choose a weapon", options)
    }

    /// Use the totem after a defeat.
    pub fn load_checkpoint() -> Self {
        Self::new(
            PromptKind::LoadCheckpoint,
            "Use the magic totem to load the saved game?",
            labels(&["Yes", "No"]),
        )
    }

    /// What the prompt asks.
    pub fn kind(&self) -> PromptKind {
        self.kind
    }

    /// The question text.
    pub fn heading(&self) -> &str {
        &self.heading
    }

    /// Option labels; option `n` (1-based) is `options()[n - 1]`.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The player's inventory, for item prompts.
    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    /// The player's status, for battle prompts.
    pub fn status(&self) -> Option<&PlayerStatus> {
        self.status.as_ref()
    }

    /// Accept `choice` if it names one of the options.
    pub fn check(&self, choice: usize) -> AdventureResult<usize> {
        if (1..=self.options.len()).contains(&choice) {
            Ok(choice)
        } else {
            Err(AdventureError::InvalidChoice {
                choice,
                max: self.options.len(),
            })
        }
    }
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn monster_heading(monster: &Combatant) -> String {
    format!(
        "{} monster: health {}, attack {}",
        monster.class_kind(),
        monster.health(),
        monster.attack_power()
    )
}

/// Answers prompts with a 1-based option number.
pub trait DecisionProvider {
    /// Choose an option for `prompt`.
    fn choose(&mut self, prompt: &Prompt) -> AdventureResult<usize>;
}

/// Replays a fixed list of answers.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
    answers: VecDeque<usize>,
}

impl ScriptedDecisions {
    /// Create a provider that answers with `answers` in order.
    pub fn new(answers: impl IntoIterator<Item = usize>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
        }
    }

    /// Answers not yet used.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl DecisionProvider for ScriptedDecisions {
    fn choose(&mut self, _prompt: &Prompt) -> AdventureResult<usize> {
        self.answers
            .pop_front()
            .ok_or(AdventureError::DecisionsExhausted)
    }
}

/// Answers prompts with a closure.
pub struct FnDecisions<F>(pub F);

impl<F> DecisionProvider for FnDecisions<F>
where
    F: FnMut(&Prompt) -> AdventureResult<usize>,
{
    fn choose(&mut self, prompt: &Prompt) -> AdventureResult<usize> {
        (self.0)(prompt)
    }
}

impl<F> std::fmt::Debug for FnDecisions<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnDecisions")
    }
}
