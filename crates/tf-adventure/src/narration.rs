//! The narration boundary: typed messages the engine emits for display.

use tf_mechanics::{ClassKind, Item, ItemKind, Rating};

/// Something that happened, for the player to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Narration {
    /// A class was picked.
    ClassChosen(ClassKind),
    /// A healing item was eaten.
    Healed {
        /// Health restored.
        amount: i32,
        /// Health afterwards.
        health: i32,
    },
    /// An item was found.
    ItemFound(Item),
    /// A found item was taken.
    ItemTaken(Item),
    /// A found item was left behind.
    ItemLeft(Item),
    /// A checkpoint was stored.
    GameSaved,
    /// A monster appeared.
    MonsterEncountered {
        /// Monster class.
        class: ClassKind,
        /// Monster health.
        health: i32,
        /// Monster attack power.
        attack: i32,
    },
    /// A different weapon was equipped mid-battle.
    WeaponEquipped(Item),
    /// The player dodged a blow.
    Dodged,
    /// The player took a hit.
    PlayerWounded {
        /// Damage taken.
        damage: i32,
        /// Health afterwards.
        health: i32,
    },
    /// The monster survived an exchange.
    MonsterWounded {
        /// Monster health left.
        health: i32,
        /// Monster attack power.
        attack: i32,
    },
    /// The player left the battle.
    Retreated,
    /// The monster died and the player lived.
    MonsterSlain {
        /// Battles won so far.
        victories: u32,
    },
    /// The player died.
    Defeat,
    /// The player and the monster died in the same exchange.
    MutualDestruction,
    /// A checkpoint was loaded after a defeat.
    GameLoaded {
        /// Health after loading.
        health: i32,
    },
    /// Enough battles were won.
    Victory,
}

impl std::fmt::Display for Narration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ClassChosen(class) => write!(f, "You chose the {class} class."),
            Self::Healed { amount, health } => write!(
                f,
                "You ate an apple and recovered {amount} health. Health is now {health}."
            ),
            Self::ItemFound(item) => match (item.kind, item.rating) {
                (ItemKind::Ammunition, _) => write!(f, "You found a quiver of arrows."),
                (ItemKind::Checkpoint, _) => write!(f, "You found a magic totem."),
                (kind, Rating::Damage(n)) => write!(f, "You found a {kind} with attack {n}."),
                _ => write!(f, "You found {item}."),
            },
            Self::ItemTaken(item) => write!(f, "You took the {}.", item.kind),
            Self::ItemLeft(item) => write!(f, "You left the {} behind.", item.kind),
            Self::GameSaved => write!(f, "Game saved!"),
            Self::MonsterEncountered {
                class,
                health,
                attack,
            } => write!(
                f,
                "BATTLE! A monster of the {class} class blocks the way. Health {health}, attack {attack}."
            ),
            Self::WeaponEquipped(item) => {
                write!(f, "You ready the {} (attack {}).", item.kind, item.value())
            }
            Self::Dodged => write!(f, "You dodged the monster's blow!"),
            Self::PlayerWounded { damage, health } => {
                write!(f, "The monster hits you for {damage}. Health {health}.")
            }
            Self::MonsterWounded { health, attack } => write!(
                f,
                "The monster is wounded! Health {health} left, attack {attack}."
            ),
            Self::Retreated => write!(f, "You retreat and leave the monster behind."),
            Self::MonsterSlain { victories } => {
                write!(f, "The monster is slain! Victories: {victories}.")
            }
            Self::Defeat => write!(f, "DEFEAT. You have fallen."),
            Self::MutualDestruction => write!(
                f,
                "DEFEAT. You rid the world of a great evil at the cost of your own life."
            ),
            Self::GameLoaded { health } => {
                write!(f, "The totem crumbles to dust. Game loaded, health {health}.")
            }
            Self::Victory => write!(f, "VICTORY! The land is safe again."),
        }
    }
}

/// Receives narration from the engine.
pub trait NarrationSink {
    /// Deliver one message.
    fn notify(&mut self, message: Narration);
}

impl NarrationSink for Vec<Narration> {
    fn notify(&mut self, message: Narration) {
        self.push(message);
    }
}
