//! Combatants: the player character and the monsters it fights.
//!
//! Both sides share one type. The [`ClassKind`] only matters in two places:
//! a player can dodge an attacker of its own class, and find events favor
//! the class's affinity item.

pub mod inventory;

pub use inventory::Inventory;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};
use crate::item::{Item, ItemKind};
use crate::snapshot::Snapshot;

/// Chance that a player dodges an attacker of the same class.
pub const DODGE_CHANCE: f64 = 0.5;

/// Character archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    /// Close combat; favors melee weapons.
    Melee,
    /// Bow and arrows; favors ranged weapons.
    Ranged,
    /// Spellcasting; favors spell foci.
    Caster,
}

impl ClassKind {
    /// All classes in selection order.
    pub const ALL: [ClassKind; 3] = [Self::Melee, Self::Ranged, Self::Caster];

    /// The item kind this class finds improved versions of.
    pub fn affinity(self) -> ItemKind {
        match self {
            Self::Melee => ItemKind::MeleeWeapon,
            Self::Ranged => ItemKind::RangedWeapon,
            Self::Caster => ItemKind::SpellFocus,
        }
    }

    /// Pick a class uniformly at random.
    pub fn random(rng: &mut StdRng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

impl std::fmt::Display for ClassKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Melee => write!(f, "Swordsman"),
            Self::Ranged => write!(f, "Archer"),
            Self::Caster => write!(f, "Wizard"),
        }
    }
}

/// Which side of a fight a combatant is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// The player character.
    Player,
    /// A monster.
    Monster,
}

/// The result of one attack against a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    /// Damage actually taken (0 on a dodge).
    pub damage: i32,
    /// Whether the defender dodged.
    pub dodged: bool,
    /// Defender health after the attack. May be zero or negative.
    pub health: i32,
}

/// A participant in battle with health, attack power, and (for players)
/// an inventory and an equipped weapon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combatant {
    class_kind: ClassKind,
    side: Side,
    health: i32,
    attack_power: i32,
    equipped_weapon: Option<ItemKind>,
    inventory: Inventory,
}

impl Combatant {
    /// Create a player character with an empty inventory.
    pub fn player(class_kind: ClassKind, health: i32, attack_power: i32) -> Self {
        Self::new(class_kind, Side::Player, health, attack_power)
    }

    /// Create a monster. Monsters carry nothing and never re-arm.
    pub fn monster(class_kind: ClassKind, health: i32, attack_power: i32) -> Self {
        Self::new(class_kind, Side::Monster, health, attack_power)
    }

    fn new(class_kind: ClassKind, side: Side, health: i32, attack_power: i32) -> Self {
        Self {
            class_kind,
            side,
            health,
            attack_power,
            equipped_weapon: None,
            inventory: Inventory::new(),
        }
    }

    /// The combatant's class.
    pub fn class_kind(&self) -> ClassKind {
        self.class_kind
    }

    /// Player or monster.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Current health. May be zero or negative after a lethal blow.
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Damage dealt per strike.
    pub fn attack_power(&self) -> i32 {
        self.attack_power
    }

    /// Kind of the currently wielded weapon.
    pub fn equipped_weapon(&self) -> Option<ItemKind> {
        self.equipped_weapon
    }

    /// The carried items.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Returns true while health is above zero.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// `(kind, rating)` pairs for every carried item, in order.
    pub fn inventory_summary(&self) -> Vec<(ItemKind, i32)> {
        self.inventory.iter().map(|i| (i.kind, i.value())).collect()
    }

    /// Returns true if an item of `kind` is carried.
    pub fn has_item(&self, kind: ItemKind) -> bool {
        self.inventory.contains(kind)
    }

    /// Add an item to the inventory.
    ///
    /// With `as_initial_weapon` the item is also equipped and sets attack
    /// power. An item of a kind already carried replaces the old one; if
    /// that kind is the equipped weapon, attack power follows the new
    /// rating.
    pub fn add_item(&mut self, item: Item, as_initial_weapon: bool) {
        if as_initial_weapon {
            self.equipped_weapon = Some(item.kind);
            self.attack_power = item.value();
        }
        if self.inventory.upsert(item).is_some() && self.equipped_weapon == Some(item.kind) {
            self.attack_power = item.value();
        }
    }

    /// Remove and return the carried item of `kind`.
    pub fn remove_item(&mut self, kind: ItemKind) -> MechResult<Item> {
        self.inventory
            .remove(kind)
            .ok_or(MechError::ItemNotFound(kind))
    }

    /// Carried items that can be wielded right now.
    ///
    /// A bow is only offered while arrows are carried.
    pub fn eligible_weapons(&self) -> Vec<Item> {
        let has_ammunition = self.has_item(ItemKind::Ammunition);
        self.inventory
            .iter()
            .filter(|i| match i.kind {
                ItemKind::MeleeWeapon | ItemKind::SpellFocus => true,
                ItemKind::RangedWeapon => has_ammunition,
                ItemKind::Ammunition | ItemKind::Healing | ItemKind::Checkpoint => false,
            })
            .copied()
            .collect()
    }

    /// Equip the eligible weapon at `index` (0-based).
    pub fn select_weapon(&mut self, index: usize) -> MechResult<Item> {
        let eligible = self.eligible_weapons();
        let weapon = eligible
            .get(index)
            .copied()
            .ok_or(MechError::WeaponIndexOutOfRange {
                index,
                len: eligible.len(),
            })?;
        self.equipped_weapon = Some(weapon.kind);
        self.attack_power = weapon.value();
        Ok(weapon)
    }

    /// Raise health. There is no upper bound.
    pub fn increase_health(&mut self, amount: i32) -> i32 {
        self.health += amount;
        self.health
    }

    /// Take one attack from `attacker`.
    ///
    /// A player facing an attacker of its own class dodges half the time.
    /// Monsters never dodge.
    pub fn receive_attack(&mut self, attacker: &Combatant, rng: &mut StdRng) -> Strike {
        let can_dodge = self.side == Side::Player && attacker.class_kind == self.class_kind;
        let dodged = can_dodge && rng.random_bool(DODGE_CHANCE);
        let damage = if dodged { 0 } else { attacker.attack_power };
        self.health -= damage;
        Strike {
            damage,
            dodged,
            health: self.health,
        }
    }

    /// Capture the mutable state.
    pub fn save(&self) -> Snapshot {
        Snapshot::new(
            self.health,
            self.attack_power,
            self.equipped_weapon,
            self.inventory.clone(),
        )
    }

    /// Replace the mutable state with a snapshot's.
    ///
    /// State is untouched if the snapshot fails validation.
    pub fn restore(&mut self, snapshot: &Snapshot) -> MechResult<()> {
        snapshot.validate()?;
        self.health = snapshot.health();
        self.attack_power = snapshot.attack_power();
        self.equipped_weapon = snapshot.equipped_weapon();
        self.inventory = snapshot.inventory().clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{CatalogConfig, ItemFactory, Rating};
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn swordsman() -> Combatant {
        let mut p = Combatant::player(ClassKind::Melee, 15, 15);
        p.add_item(Item::weapon(ItemKind::MeleeWeapon, 15), true);
        p
    }

    #[test]
    fn class_affinity_and_names() {
        assert_eq!(ClassKind::Melee.affinity(), ItemKind::MeleeWeapon);
        assert_eq!(ClassKind::Ranged.affinity(), ItemKind::RangedWeapon);
        assert_eq!(ClassKind::Caster.affinity(), ItemKind::SpellFocus);
        assert_eq!(ClassKind::Melee.to_string(), "Swordsman");
        assert_eq!(ClassKind::Ranged.to_string(), "Archer");
        assert_eq!(ClassKind::Caster.to_string(), "Wizard");
    }

    #[test]
    fn initial_weapon_equips() {
        let p = swordsman();
        assert_eq!(p.equipped_weapon(), Some(ItemKind::MeleeWeapon));
        assert_eq!(p.attack_power(), 15);
        assert_eq!(p.inventory_summary(), vec![(ItemKind::MeleeWeapon, 15)]);
    }

    #[test]
    fn replacing_equipped_weapon_refreshes_attack() {
        let mut p = swordsman();
        p.add_item(Item::weapon(ItemKind::MeleeWeapon, 31), false);
        assert_eq!(p.attack_power(), 31);
        assert_eq!(p.inventory().len(), 1);
    }

    #[test]
    fn unequipped_add_keeps_attack() {
        let mut p = swordsman();
        p.add_item(Item::weapon(ItemKind::SpellFocus, 30), false);
        assert_eq!(p.attack_power(), 15);
        assert_eq!(p.equipped_weapon(), Some(ItemKind::MeleeWeapon));
        assert_eq!(p.inventory().len(), 2);
    }

    #[test]
    fn remove_missing_item_errors() {
        let mut p = swordsman();
        assert!(matches!(
            p.remove_item(ItemKind::Checkpoint),
            Err(MechError::ItemNotFound(ItemKind::Checkpoint))
        ));
        p.add_item(Item::checkpoint(), false);
        assert_eq!(p.remove_item(ItemKind::Checkpoint).unwrap(), Item::checkpoint());
        assert!(!p.has_item(ItemKind::Checkpoint));
    }

    #[test]
    fn bow_needs_arrows() {
        let mut p = swordsman();
        p.add_item(Item::weapon(ItemKind::RangedWeapon, 22), false);
        p.add_item(Item::new(ItemKind::Healing, Rating::Healing(4)), false);
        p.add_item(Item::checkpoint(), false);
        let kinds: Vec<_> = p.eligible_weapons().iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![ItemKind::MeleeWeapon]);

        p.add_item(Item::ammunition(), false);
        let kinds: Vec<_> = p.eligible_weapons().iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![ItemKind::MeleeWeapon, ItemKind::RangedWeapon]);
    }

    #[test]
    fn select_weapon_equips() {
        let mut p = swordsman();
        p.add_item(Item::weapon(ItemKind::SpellFocus, 27), false);
        let chosen = p.select_weapon(1).unwrap();
        assert_eq!(chosen.kind, ItemKind::SpellFocus);
        assert_eq!(p.equipped_weapon(), Some(ItemKind::SpellFocus));
        assert_eq!(p.attack_power(), 27);
    }

    #[test]
    fn select_weapon_out_of_range() {
        let mut p = swordsman();
        assert!(matches!(
            p.select_weapon(3),
            Err(MechError::WeaponIndexOutOfRange { index: 3, len: 1 })
        ));
        assert_eq!(p.attack_power(), 15);
    }

    #[test]
    fn health_has_no_cap() {
        let mut p = swordsman();
        assert_eq!(p.increase_health(100), 115);
    }

    #[test]
    fn monsters_never_dodge() {
        let mut rng = StdRng::seed_from_u64(3);
        let p = swordsman();
        let mut m = Combatant::monster(ClassKind::Melee, 12, 5);
        for _ in 0..20 {
            let strike = m.receive_attack(&p, &mut rng);
            assert!(!strike.dodged);
            assert_eq!(strike.damage, 15);
        }
    }

    #[test]
    fn mismatched_class_always_hits() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = swordsman();
        let m = Combatant::monster(ClassKind::Caster, 12, 2);
        for _ in 0..20 {
            assert!(!p.receive_attack(&m, &mut rng).dodged);
        }
        assert_eq!(p.health(), 15 - 40);
        assert!(!p.is_alive());
    }

    #[test]
    fn same_class_dodges_about_half() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut p = Combatant::player(ClassKind::Ranged, 4, 15);
        let m = Combatant::monster(ClassKind::Ranged, 20, 10);
        let mut dodges = 0;
        for _ in 0..1000 {
            let before = p.health();
            let strike = p.receive_attack(&m, &mut rng);
            if strike.dodged {
                dodges += 1;
                assert_eq!(strike.damage, 0);
                assert_eq!(p.health(), before);
            } else {
                assert_eq!(strike.damage, 10);
                assert_eq!(p.health(), before - 10);
            }
        }
        assert!((400..=600).contains(&dodges), "dodges = {dodges}");
    }

    #[test]
    fn restore_rejects_corrupt_snapshot() {
        let mut p = swordsman();
        let bad = Snapshot::new(
            9,
            99,
            Some(ItemKind::MeleeWeapon),
            Inventory::from_items(vec![Item::weapon(ItemKind::MeleeWeapon, 15)]),
        );
        assert!(matches!(p.restore(&bad), Err(MechError::CorruptSnapshot(_))));
        assert_eq!(p.health(), 15);
        assert_eq!(p.attack_power(), 15);
    }

    fn arb_item() -> impl Strategy<Value = Item> {
        (0usize..6, 0i32..40).prop_map(|(k, v)| match ItemKind::ALL[k] {
            ItemKind::Ammunition => Item::ammunition(),
            ItemKind::Checkpoint => Item::checkpoint(),
            ItemKind::Healing => Item::new(ItemKind::Healing, Rating::Healing(v)),
            kind => Item::weapon(kind, v),
        })
    }

    proptest! {
        #[test]
        fn add_is_idempotent_on_kind(a in arb_item(), b in 0i32..40) {
            let mut p = swordsman();
            let second = match a.rating {
                Rating::Damage(_) if a.kind.is_weapon() => Item::weapon(a.kind, b),
                Rating::Healing(_) => Item::new(a.kind, Rating::Healing(b)),
                _ => a,
            };
            p.add_item(a, false);
            let before = p.inventory().len();
            p.add_item(second, false);
            prop_assert_eq!(p.inventory().len(), before);
            prop_assert_eq!(p.inventory().get(a.kind).copied(), Some(second));
        }

        #[test]
        fn equip_invariant_survives_adds(items in proptest::collection::vec(arb_item(), 0..12)) {
            let mut p = swordsman();
            for item in items {
                p.add_item(item, false);
                let equipped = p.equipped_weapon().unwrap();
                let rating = p.inventory().get(equipped).map(Item::value);
                prop_assert_eq!(rating, Some(p.attack_power()));
            }
        }

        #[test]
        fn bow_excluded_without_arrows(items in proptest::collection::vec(arb_item(), 0..12)) {
            let mut p = swordsman();
            for item in items {
                p.add_item(item, false);
            }
            let eligible = p.eligible_weapons();
            if !p.has_item(ItemKind::Ammunition) {
                prop_assert!(eligible.iter().all(|i| i.kind != ItemKind::RangedWeapon));
            }
            prop_assert!(eligible.iter().all(|i| i.kind.is_weapon()));
        }

        #[test]
        fn snapshot_round_trip(seed in any::<u64>(), items in proptest::collection::vec(arb_item(), 0..8)) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut p = Combatant::player(ClassKind::Caster, 15, 15);
            let sword = ItemFactory::new(ItemKind::MeleeWeapon, &CatalogConfig::default(), &mut rng);
            p.add_item(sword.create_standard(), true);
            for item in items {
                p.add_item(item, false);
            }
            let before = p.clone();
            let snap = p.save();
            p.increase_health(7);
            p.add_item(Item::checkpoint(), false);
            p.restore(&snap).unwrap();
            prop_assert_eq!(p, before);
        }
    }
}
