//! Combat core: weapons, classes, characters and round resolution

pub mod battle;
pub mod character;
pub mod class;
pub mod constants;
pub mod dice;
pub mod stats;
pub mod weapon_triangle;
pub mod weapons;

pub use battle::{
    can_counter, can_follow_up, crit_rate, hit_rate, resolve_attack, AttackRecord, Battle,
    RoundSummary, Side, StrikeKind, Terrain,
};
pub use character::{Character, DirectAttack};
pub use class::CharacterClass;
pub use dice::{Dice, FixedRolls};
pub use stats::{GrowthRates, Stat, Stats};
pub use weapon_triangle::{apply_advantage, get_advantage, weapon_advantage, Advantage};
pub use weapons::{Weapon, WeaponCategory, WeaponRange};
