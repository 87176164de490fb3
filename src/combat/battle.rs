//! Round resolution
//!
//! One `Battle` resolves one round between two characters:
//!
//! ```text
//! initial strike -> [defeat?] -> counter -> [defeat?] -> ONE follow-up -> [defeat?]
//! ```
//!
//! The round short-circuits on the first defeat. HP changes persist on
//! the characters; the battle itself only keeps the log and the verdict.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combat::character::Character;
use crate::combat::constants::{
    CRIT_MULTIPLIER, ENGAGEMENT_DISTANCE, FOLLOW_UP_SPEED_THRESHOLD, MAX_ATTACKS_PER_ROUND,
    MAX_HIT_RATE, MIN_RATE,
};
use crate::combat::dice::Dice;
use crate::combat::weapon_triangle::apply_advantage;

/// Battlefield modifiers. Only a flat avoid bonus is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Terrain {
    pub avoid: i32,
}

impl Terrain {
    pub fn with_avoid(avoid: i32) -> Self {
        Self { avoid }
    }
}

/// Which side of the round a character fights on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Attacker,
    Defender,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }
}

/// Position of a strike within the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrikeKind {
    Initial,
    Counter,
    FollowUp,
}

/// One logged strike
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRecord {
    pub actor: String,
    pub target: String,
    pub side: Side,
    pub kind: StrikeKind,
    pub hit: bool,
    pub critical: bool,
    pub effective: bool,
    pub damage: i32,
    pub target_hp_remaining: i32,
    pub message: String,
}

impl fmt::Display for AttackRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of a single `resolve_round` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub victor: Option<Side>,
    pub victor_name: Option<String>,
    /// Strikes from this round only (1 to 4)
    pub attacks: Vec<AttackRecord>,
}

impl RoundSummary {
    pub fn is_decisive(&self) -> bool {
        self.victor.is_some()
    }

    pub fn misses(&self) -> usize {
        self.attacks.iter().filter(|a| !a.hit).count()
    }

    pub fn critical_hits(&self) -> usize {
        self.attacks.iter().filter(|a| a.critical).count()
    }
}

// ============================================================================
// Formulas
// ============================================================================

/// Final hit rate of `actor` against `target`, clamped to 0..=100
///
/// ```text
/// hit   = weapon hit + SKL*2 + LCK/2   (then weapon triangle on hit only)
/// avoid = target SPD*2 + target LCK + terrain avoid
/// ```
pub fn hit_rate(actor: &Character, target: &Character, terrain: &Terrain) -> i32 {
    let weapon_hit = actor.weapon().map_or(0, |w| w.hit);
    let hit = weapon_hit + actor.stats.skill * 2 + actor.stats.luck / 2;

    // Damage side of the triangle is dropped here
    let (_, hit) = apply_advantage(actor.weapon(), target.weapon(), 0, hit);

    let avoid = target.stats.speed * 2 + target.stats.luck;

    (hit - avoid - terrain.avoid).clamp(MIN_RATE, MAX_HIT_RATE)
}

/// Final critical rate; floored at 0 but not capped
pub fn crit_rate(actor: &Character, target: &Character) -> i32 {
    let weapon_crit = actor.weapon().map_or(0, |w| w.crit);
    let crit = weapon_crit + actor.stats.skill / 2;
    (crit - target.stats.luck).max(MIN_RATE)
}

/// The defender counters only if its own weapon reaches the engagement distance
pub fn can_counter(defender: &Character) -> bool {
    defender
        .weapon()
        .is_some_and(|w| w.range.contains(ENGAGEMENT_DISTANCE))
}

pub fn can_follow_up(actor: &Character, opponent: &Character) -> bool {
    actor.stats.speed >= opponent.stats.speed + FOLLOW_UP_SPEED_THRESHOLD
}

fn rolls_under<D: Dice + ?Sized>(dice: &mut D, rate: i32) -> bool {
    i64::from(dice.roll_d100()) <= i64::from(rate)
}

fn strike_message(actor: &str, target: &str, effective: bool, critical: bool, damage: i32) -> String {
    let mut message = actor.to_string();
    if effective {
        message.push_str(" attacks with effectiveness!");
    }
    if critical {
        message.push_str(" lands a critical hit!");
    } else {
        message.push_str(" attacks!");
    }
    message.push_str(&format!(" Deals {} damage to {}!", damage, target));
    message
}

/// Resolve one strike: hit roll, crit roll on a hit, then damage
///
/// A miss consumes exactly one roll and leaves the target untouched.
pub fn resolve_attack<D: Dice + ?Sized>(
    actor: &Character,
    target: &mut Character,
    terrain: &Terrain,
    side: Side,
    kind: StrikeKind,
    dice: &mut D,
) -> AttackRecord {
    let hit_chance = hit_rate(actor, target, terrain);

    if !rolls_under(dice, hit_chance) {
        tracing::debug!("{:?} {:?}: {} misses {}", side, kind, actor.name, target.name);
        return AttackRecord {
            actor: actor.name.clone(),
            target: target.name.clone(),
            side,
            kind,
            hit: false,
            critical: false,
            effective: false,
            damage: 0,
            target_hp_remaining: target.current_hp,
            message: format!("{}'s attack missed!", actor.name),
        };
    }

    let critical = rolls_under(dice, crit_rate(actor, target));

    let base = actor.calculate_damage(target);
    let damage = if critical { base * CRIT_MULTIPLIER } else { base };
    let effective = actor.is_effective_against(target);

    let remaining = target.take_damage(damage);

    tracing::debug!(
        "{:?} {:?}: {} -> {} for {} (crit: {}, effective: {}), {} HP left",
        side,
        kind,
        actor.name,
        target.name,
        damage,
        critical,
        effective,
        remaining
    );

    AttackRecord {
        actor: actor.name.clone(),
        target: target.name.clone(),
        side,
        kind,
        hit: true,
        critical,
        effective,
        damage,
        target_hp_remaining: remaining,
        message: strike_message(&actor.name, &target.name, effective, critical, damage),
    }
}

// ============================================================================
// Battle
// ============================================================================

/// A single round between two characters
pub struct Battle<'a> {
    attacker: &'a mut Character,
    defender: &'a mut Character,
    terrain: Terrain,
    log: Vec<AttackRecord>,
    victor: Option<Side>,
}

impl<'a> Battle<'a> {
    pub fn new(attacker: &'a mut Character, defender: &'a mut Character) -> Self {
        Self::with_terrain(attacker, defender, Terrain::default())
    }

    pub fn with_terrain(
        attacker: &'a mut Character,
        defender: &'a mut Character,
        terrain: Terrain,
    ) -> Self {
        Self {
            attacker,
            defender,
            terrain,
            log: Vec::new(),
            victor: None,
        }
    }

    pub fn attacker(&self) -> &Character {
        &*self.attacker
    }

    pub fn defender(&self) -> &Character {
        &*self.defender
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// Every strike recorded by this battle, across all rounds
    pub fn log(&self) -> &[AttackRecord] {
        &self.log
    }

    pub fn victor(&self) -> Option<Side> {
        self.victor
    }

    pub fn victor_name(&self) -> Option<&str> {
        self.victor.map(|side| match side {
            Side::Attacker => self.attacker.name.as_str(),
            Side::Defender => self.defender.name.as_str(),
        })
    }

    pub fn into_log(self) -> Vec<AttackRecord> {
        self.log
    }

    /// Resolve one full round and return what happened in it
    pub fn resolve_round<D: Dice + ?Sized>(&mut self, dice: &mut D) -> RoundSummary {
        let start = self.log.len();

        // 1. Initial strike
        self.strike(Side::Attacker, StrikeKind::Initial, dice);
        if self.defender.is_defeated() {
            return self.finish(Some(Side::Attacker), start);
        }

        // 2. Counter
        let countered = can_counter(self.defender);
        if countered {
            self.strike(Side::Defender, StrikeKind::Counter, dice);
            if self.attacker.is_defeated() {
                return self.finish(Some(Side::Defender), start);
            }
        } else {
            tracing::debug!("{} cannot counter", self.defender.name);
        }

        // 3. At most one follow-up; the defender's requires a counter
        if can_follow_up(self.attacker, self.defender) && self.defender.is_alive() {
            self.strike(Side::Attacker, StrikeKind::FollowUp, dice);
            if self.defender.is_defeated() {
                return self.finish(Some(Side::Attacker), start);
            }
        } else if can_follow_up(self.defender, self.attacker)
            && countered
            && self.attacker.is_alive()
        {
            self.strike(Side::Defender, StrikeKind::FollowUp, dice);
            if self.attacker.is_defeated() {
                return self.finish(Some(Side::Defender), start);
            }
        }

        self.finish(None, start)
    }

    fn strike<D: Dice + ?Sized>(&mut self, side: Side, kind: StrikeKind, dice: &mut D) {
        let record = match side {
            Side::Attacker => resolve_attack(
                &*self.attacker,
                &mut *self.defender,
                &self.terrain,
                side,
                kind,
                dice,
            ),
            Side::Defender => resolve_attack(
                &*self.defender,
                &mut *self.attacker,
                &self.terrain,
                side,
                kind,
                dice,
            ),
        };
        self.log.push(record);
    }

    fn finish(&mut self, victor: Option<Side>, start: usize) -> RoundSummary {
        debug_assert!(self.log.len() - start <= MAX_ATTACKS_PER_ROUND);

        if victor.is_some() {
            self.victor = victor;
        }

        let victor_name = victor.and_then(|_| self.victor_name().map(str::to_string));
        if let Some(name) = &victor_name {
            tracing::info!("{} is victorious", name);
        }

        RoundSummary {
            victor,
            victor_name,
            attacks: self.log[start..].to_vec(),
        }
    }
}
