//! Weapon triangle: Sword > Axe > Lance > Sword
//!
//! Bows, magic and everything else sit outside the cycle and are always
//! neutral. Modifiers are ADDITIVE.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{TRIANGLE_DAMAGE_BONUS, TRIANGLE_HIT_BONUS};
use crate::combat::weapons::{Weapon, WeaponCategory};

/// Attacker's standing in the triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Advantage {
    Advantage,
    Neutral,
    Disadvantage,
}

impl Advantage {
    /// +1, 0 or -1
    pub fn value(&self) -> i32 {
        match self {
            Advantage::Advantage => 1,
            Advantage::Neutral => 0,
            Advantage::Disadvantage => -1,
        }
    }

    /// The same matchup seen from the other side
    pub fn reversed(&self) -> Self {
        match self {
            Advantage::Advantage => Advantage::Disadvantage,
            Advantage::Neutral => Advantage::Neutral,
            Advantage::Disadvantage => Advantage::Advantage,
        }
    }
}

/// The category this one beats, if it is part of the cycle
fn beats(category: WeaponCategory) -> Option<WeaponCategory> {
    match category {
        WeaponCategory::Sword => Some(WeaponCategory::Axe),
        WeaponCategory::Axe => Some(WeaponCategory::Lance),
        WeaponCategory::Lance => Some(WeaponCategory::Sword),
        WeaponCategory::Bow
        | WeaponCategory::Tome
        | WeaponCategory::Staff
        | WeaponCategory::Other => None,
    }
}

pub fn get_advantage(attacker: WeaponCategory, defender: WeaponCategory) -> Advantage {
    if beats(attacker) == Some(defender) {
        Advantage::Advantage
    } else if beats(defender) == Some(attacker) {
        Advantage::Disadvantage
    } else {
        Advantage::Neutral
    }
}

/// Triangle standing between two optional weapons (neutral if either is missing)
pub fn weapon_advantage(attacker: Option<&Weapon>, defender: Option<&Weapon>) -> Advantage {
    match (attacker, defender) {
        (Some(a), Some(d)) => get_advantage(a.category, d.category),
        _ => Advantage::Neutral,
    }
}

/// Apply the triangle to `(damage, hit)`
///
/// Advantage: +1 damage, +15 hit. Disadvantage: -1 damage, -15 hit,
/// each floored at 0. No upper clamp here; the hit rate formula caps
/// at 100 later.
pub fn apply_advantage(
    attacker: Option<&Weapon>,
    defender: Option<&Weapon>,
    damage: i32,
    hit: i32,
) -> (i32, i32) {
    match weapon_advantage(attacker, defender) {
        Advantage::Advantage => (damage + TRIANGLE_DAMAGE_BONUS, hit + TRIANGLE_HIT_BONUS),
        Advantage::Disadvantage => (
            (damage - TRIANGLE_DAMAGE_BONUS).max(0),
            (hit - TRIANGLE_HIT_BONUS).max(0),
        ),
        Advantage::Neutral => (damage, hit),
    }
}
