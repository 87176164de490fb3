//! Deterministic combat forecast
//!
//! What the attacker's next strike would do, without rolling anything.

use serde::{Deserialize, Serialize};

use crate::combat::battle::{can_follow_up, crit_rate, hit_rate, Terrain};
use crate::combat::character::Character;
use crate::combat::constants::CRIT_MULTIPLIER;
use crate::combat::weapon_triangle::{weapon_advantage, Advantage};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageForecast {
    /// Damage of a normal hit (effectiveness included)
    pub damage: i32,
    pub crit_damage: i32,
    pub hit_rate: i32,
    pub crit_rate: i32,
    pub effective: bool,
    /// Weapon name contains "Brave". Informational; rounds never double-strike.
    pub brave: bool,
    pub triangle: Advantage,
    pub follow_up: bool,
}

impl DamageForecast {
    fn unarmed() -> Self {
        Self {
            damage: 0,
            crit_damage: 0,
            hit_rate: 0,
            crit_rate: 0,
            effective: false,
            brave: false,
            triangle: Advantage::Neutral,
            follow_up: false,
        }
    }

    /// Expected damage of one strike, weighting crits by their rate
    pub fn expected_damage(&self) -> f64 {
        let hit = f64::from(self.hit_rate) / 100.0;
        let crit = (f64::from(self.crit_rate) / 100.0).min(1.0);
        hit * (f64::from(self.damage) * (1.0 - crit) + f64::from(self.crit_damage) * crit)
    }
}

pub fn predict_damage(attacker: &Character, defender: &Character, terrain: &Terrain) -> DamageForecast {
    let Some(weapon) = attacker.weapon() else {
        return DamageForecast::unarmed();
    };

    let damage = attacker.calculate_damage(defender);

    DamageForecast {
        damage,
        crit_damage: damage * CRIT_MULTIPLIER,
        hit_rate: hit_rate(attacker, defender, terrain),
        crit_rate: crit_rate(attacker, defender),
        effective: attacker.is_effective_against(defender),
        brave: weapon.name.contains("Brave"),
        triangle: weapon_advantage(Some(weapon), defender.weapon()),
        follow_up: can_follow_up(attacker, defender),
    }
}
