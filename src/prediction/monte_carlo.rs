//! Monte Carlo battle prediction
//!
//! Fights the same matchup many times and aggregates the outcomes. Each
//! simulated battle starts from the HP both sides had on entry and runs
//! rounds until someone falls or the round limit is hit (a draw).

use serde::{Deserialize, Serialize};

use crate::combat::battle::{Battle, Side, Terrain};
use crate::combat::character::Character;
use crate::combat::dice::Dice;
use crate::core::config::SimulatorConfig;
use crate::core::error::{Result, SimError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionOptions {
    pub iterations: u32,
    pub max_rounds: u32,
    pub terrain: Terrain,
}

impl PredictionOptions {
    /// Every simulated battle fights at least one round
    pub fn validate(&self) -> Result<()> {
        if self.max_rounds == 0 {
            return Err(SimError::InvalidConfig(
                "max_rounds must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for PredictionOptions {
    fn default() -> Self {
        Self {
            iterations: 100,
            max_rounds: 10,
            terrain: Terrain::default(),
        }
    }
}

impl From<&SimulatorConfig> for PredictionOptions {
    fn from(config: &SimulatorConfig) -> Self {
        Self {
            iterations: config.iterations,
            max_rounds: config.max_rounds,
            terrain: Terrain::with_avoid(config.terrain_avoid),
        }
    }
}

/// Aggregated results of a prediction run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutcomeStats {
    pub iterations: u32,
    pub attacker_victories: u32,
    pub defender_victories: u32,
    /// Battles that hit the round limit with both sides standing
    pub draws: u32,

    pub average_attacker_remaining_hp: f64,
    pub average_defender_remaining_hp: f64,
    pub average_rounds: f64,
    pub average_attacks: f64,

    pub total_attacks: u64,
    pub critical_hits: u64,
    pub misses: u64,

    pub attacker_victory_percentage: f64,
    pub defender_victory_percentage: f64,
    pub draw_percentage: f64,
    pub miss_percentage: f64,
    pub crit_percentage: f64,
}

fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Simulate `options.iterations` battles and aggregate the results
///
/// Both characters get their entry HP back when the run is over. Zero
/// iterations yields empty stats; zero rounds is rejected.
pub fn predict_battle_outcome<D: Dice + ?Sized>(
    attacker: &mut Character,
    defender: &mut Character,
    options: &PredictionOptions,
    dice: &mut D,
) -> Result<OutcomeStats> {
    options.validate()?;

    let attacker_hp = attacker.current_hp;
    let defender_hp = defender.current_hp;

    let mut stats = OutcomeStats {
        iterations: options.iterations,
        ..OutcomeStats::default()
    };

    let mut attacker_hp_total = 0i64;
    let mut defender_hp_total = 0i64;
    let mut round_total = 0u64;

    for _ in 0..options.iterations {
        attacker.current_hp = attacker_hp;
        defender.current_hp = defender_hp;

        let mut battle = Battle::with_terrain(attacker, defender, options.terrain);
        let mut rounds = 0;
        let mut victor = None;

        while rounds < options.max_rounds {
            rounds += 1;
            let summary = battle.resolve_round(dice);

            for attack in &summary.attacks {
                stats.total_attacks += 1;
                if !attack.hit {
                    stats.misses += 1;
                } else if attack.critical {
                    stats.critical_hits += 1;
                }
            }

            if summary.victor.is_some() {
                victor = summary.victor;
                break;
            }
        }

        match victor {
            Some(Side::Attacker) => stats.attacker_victories += 1,
            Some(Side::Defender) => stats.defender_victories += 1,
            None => stats.draws += 1,
        }

        attacker_hp_total += i64::from(battle.attacker().current_hp);
        defender_hp_total += i64::from(battle.defender().current_hp);
        round_total += u64::from(rounds);
    }

    attacker.current_hp = attacker_hp;
    defender.current_hp = defender_hp;

    if options.iterations > 0 {
        let n = f64::from(options.iterations);
        stats.average_attacker_remaining_hp = attacker_hp_total as f64 / n;
        stats.average_defender_remaining_hp = defender_hp_total as f64 / n;
        stats.average_rounds = round_total as f64 / n;
        stats.average_attacks = stats.total_attacks as f64 / n;
    }

    stats.attacker_victory_percentage = percentage(u64::from(stats.attacker_victories), u64::from(options.iterations));
    stats.defender_victory_percentage = percentage(u64::from(stats.defender_victories), u64::from(options.iterations));
    stats.draw_percentage = percentage(u64::from(stats.draws), u64::from(options.iterations));
    stats.miss_percentage = percentage(stats.misses, stats.total_attacks);
    stats.crit_percentage = percentage(stats.critical_hits, stats.total_attacks);

    tracing::debug!(
        "Prediction {} vs {}: {}/{}/{} over {} battles",
        attacker.name,
        defender.name,
        stats.attacker_victories,
        stats.defender_victories,
        stats.draws,
        options.iterations
    );

    Ok(stats)
}
