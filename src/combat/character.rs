//! Characters and the damage formula
//!
//! Damage is computed here and consulted by the battle engine. `attack`
//! is a separate, roll-free entry point that just applies the damage.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::combat::class::CharacterClass;
use crate::combat::constants::NEUTRAL_MULTIPLIER;
use crate::combat::stats::Stats;
use crate::combat::weapons::Weapon;
use crate::core::error::{Result, SimError};

/// A unit on the field
#[derive(Debug, Clone)]
pub struct Character {
    pub name: String,
    pub class: Arc<CharacterClass>,
    pub stats: Stats,
    /// Never below 0; starts at `stats.hp`
    pub current_hp: i32,
    weapon: Option<Weapon>,
}

/// Result of the roll-free direct attack
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectAttack {
    pub attacker: String,
    pub defender: String,
    pub damage: i32,
    pub defender_hp_remaining: i32,
}

impl Character {
    pub fn new(
        name: impl Into<String>,
        class: Arc<CharacterClass>,
        stats: Stats,
        weapon: Option<Weapon>,
    ) -> Self {
        Self {
            name: name.into(),
            class,
            current_hp: stats.hp.max(0),
            stats,
            weapon,
        }
    }

    pub fn weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref()
    }

    pub fn weapon_mut(&mut self) -> Option<&mut Weapon> {
        self.weapon.as_mut()
    }

    /// Equip a weapon, handing back whatever was held before
    pub fn equip(&mut self, weapon: Weapon) -> Option<Weapon> {
        self.weapon.replace(weapon)
    }

    pub fn unequip(&mut self) -> Option<Weapon> {
        self.weapon.take()
    }

    pub fn max_hp(&self) -> i32 {
        self.stats.hp
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn is_defeated(&self) -> bool {
        !self.is_alive()
    }

    /// Back to full HP. Batch callers use this between simulated battles.
    pub fn reset_hp(&mut self) {
        self.current_hp = self.stats.hp.max(0);
    }

    /// Subtract damage, flooring at 0. Returns the remaining HP.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        self.current_hp = (self.current_hp - amount.max(0)).max(0);
        self.current_hp
    }

    /// Whether our weapon's effective-against tags hit the target's class
    pub fn is_effective_against(&self, target: &Character) -> bool {
        self.weapon
            .as_ref()
            .is_some_and(|weapon| weapon.is_effective_against(&target.class))
    }

    /// Damage of one non-critical strike against `target`
    ///
    /// ```text
    /// magical:  attack = MAG + might, defense = target RES
    /// physical: attack = STR + might, defense = target DEF
    /// damage   = floor(max(0, attack - defense) * effectiveness)
    /// ```
    ///
    /// Unarmed characters strike physically with might 0.
    pub fn calculate_damage(&self, target: &Character) -> i32 {
        let (attack, defense) = match &self.weapon {
            Some(weapon) if weapon.is_magical() => {
                (self.stats.magic + weapon.might, target.stats.resistance)
            }
            Some(weapon) => (self.stats.strength + weapon.might, target.stats.defense),
            None => (self.stats.strength, target.stats.defense),
        };

        let base = (attack - defense).max(0);

        let multiplier = self
            .weapon
            .as_ref()
            .map_or(NEUTRAL_MULTIPLIER, |weapon| {
                weapon.effectiveness_multiplier(&target.class)
            });

        (base as f64 * multiplier) as i32
    }

    /// Apply one strike's damage with no hit or crit roll
    ///
    /// Fails with `NoWeaponEquipped` when unarmed; the target is untouched.
    pub fn attack(&self, target: &mut Character) -> Result<DirectAttack> {
        if self.weapon.is_none() {
            return Err(SimError::NoWeaponEquipped(self.name.clone()));
        }

        let damage = self.calculate_damage(target);
        let remaining = target.take_damage(damage);

        Ok(DirectAttack {
            attacker: self.name.clone(),
            defender: target.name.clone(),
            damage,
            defender_hp_remaining: remaining,
        })
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) HP {}/{}",
            self.name, self.class, self.current_hp, self.stats.hp
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::stats::Stat;
    use crate::combat::weapons::WeaponCategory;

    fn infantry() -> Arc<CharacterClass> {
        Arc::new(CharacterClass::new("Infantry", 5, ["Infantry"]))
    }

    fn knight() -> Arc<CharacterClass> {
        Arc::new(CharacterClass::new("Knight", 4, ["Armored", "Infantry"]))
    }

    fn iron_sword() -> Weapon {
        Weapon::new("Iron Sword", WeaponCategory::Sword, 5, 90, 0).with_uses(46)
    }

    #[test]
    fn test_physical_damage() {
        let attacker = Character::new(
            "Roy",
            infantry(),
            Stats::default().with(Stat::Hp, 20).with(Stat::Str, 12),
            Some(iron_sword()),
        );
        let target = Character::new(
            "Bandit",
            infantry(),
            Stats::default().with(Stat::Hp, 20).with(Stat::Def, 11),
            None,
        );
        assert_eq!(attacker.calculate_damage(&target), 6);
    }

    #[test]
    fn test_magical_damage_uses_mag_and_res() {
        let fire = Weapon::new("Fire", WeaponCategory::Tome, 5, 90, 0);
        let mage = Character::new(
            "Lilina",
            infantry(),
            Stats::default().with(Stat::Str, 30).with(Stat::Mag, 8),
            Some(fire),
        );
        let target = Character::new(
            "Armor",
            infantry(),
            Stats::default().with(Stat::Def, 50).with(Stat::Res, 3),
            None,
        );
        assert_eq!(mage.calculate_damage(&target), 10);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let attacker = Character::new(
            "Weakling",
            infantry(),
            Stats::default().with(Stat::Str, 1),
            Some(iron_sword()),
        );
        let target = Character::new("Wall", knight(), Stats::default().with(Stat::Def, 30), None);
        assert_eq!(attacker.calculate_damage(&target), 0);
    }

    #[test]
    fn test_effective_damage_triples() {
        let armorslayer =
            Weapon::new("Armorslayer", WeaponCategory::Sword, 8, 80, 0).effective_against(["Armored"]);
        let attacker = Character::new(
            "Dieck",
            infantry(),
            Stats::default().with(Stat::Str, 9),
            Some(armorslayer),
        );
        let target = Character::new("Wallace", knight(), Stats::default().with(Stat::Def, 11), None);
        assert!(attacker.is_effective_against(&target));
        assert_eq!(attacker.calculate_damage(&target), 18);
    }

    #[test]
    fn test_unarmed_damage_uses_strength_only() {
        let brawler = Character::new("Brawler", infantry(), Stats::default().with(Stat::Str, 7), None);
        let target = Character::new("Target", infantry(), Stats::default().with(Stat::Def, 2), None);
        assert_eq!(brawler.calculate_damage(&target), 5);
        assert!(!brawler.is_effective_against(&target));
    }

    #[test]
    fn test_direct_attack_applies_damage() {
        let attacker = Character::new(
            "Roy",
            infantry(),
            Stats::default().with(Stat::Str, 12),
            Some(iron_sword()),
        );
        let mut target = Character::new(
            "Bandit",
            infantry(),
            Stats::default().with(Stat::Hp, 10).with(Stat::Def, 11),
            None,
        );

        let report = attacker.attack(&mut target).expect("armed attacker");
        assert_eq!(report.damage, 6);
        assert_eq!(report.defender_hp_remaining, 4);
        assert_eq!(target.current_hp, 4);

        let report = attacker.attack(&mut target).expect("armed attacker");
        assert_eq!(report.defender_hp_remaining, 0);
        assert!(target.is_defeated());
    }

    #[test]
    fn test_direct_attack_without_weapon_fails_softly() {
        let attacker = Character::new("Unarmed", infantry(), Stats::default().with(Stat::Str, 20), None);
        let mut target = Character::new("Target", infantry(), Stats::default().with(Stat::Hp, 10), None);

        let result = attacker.attack(&mut target);
        assert!(matches!(result, Err(SimError::NoWeaponEquipped(name)) if name == "Unarmed"));
        assert_eq!(target.current_hp, 10);
    }

    #[test]
    fn test_direct_attack_does_not_spend_uses() {
        let attacker = Character::new("Roy", infantry(), Stats::default().with(Stat::Str, 12), Some(iron_sword()));
        let mut target = Character::new("Target", infantry(), Stats::default().with(Stat::Hp, 50), None);
        attacker.attack(&mut target).unwrap();
        assert_eq!(attacker.weapon().and_then(Weapon::remaining_uses), Some(46));
    }

    #[test]
    fn test_equip_returns_previous_weapon() {
        let mut unit = Character::new("Roy", infantry(), Stats::default(), Some(iron_sword()));
        let old = unit.equip(Weapon::new("Rapier", WeaponCategory::Sword, 7, 95, 10));
        assert_eq!(old.map(|w| w.name), Some("Iron Sword".to_string()));
        assert_eq!(unit.weapon().map(|w| w.name.as_str()), Some("Rapier"));
        assert!(unit.unequip().is_some());
        assert!(unit.weapon().is_none());
    }

    #[test]
    fn test_hp_reset_and_floor() {
        let mut unit = Character::new("Roy", infantry(), Stats::default().with(Stat::Hp, 18), None);
        assert_eq!(unit.take_damage(25), 0);
        assert!(!unit.is_alive());
        unit.reset_hp();
        assert_eq!(unit.current_hp, 18);
        assert_eq!(unit.max_hp(), 18);
    }
}
