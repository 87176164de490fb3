//! Level-up stat rolls
//!
//! Each level-up rolls every stat independently: a uniform draw in
//! [0, 1) below the stat's growth rate adds one point.

use std::collections::HashMap;

use rand::Rng;

use crate::combat::stats::{GrowthRates, Stat, Stats};

/// Optional per-stat ceilings. Stats without an entry are uncapped.
pub type StatCaps = HashMap<Stat, i32>;

/// Roll `levels` level-ups for a single stat
pub fn calculate_growth<R: Rng + ?Sized>(base: i32, rate: f64, levels: u32, rng: &mut R) -> i32 {
    let gained = (0..levels).filter(|_| rng.gen::<f64>() < rate).count();
    base + gained as i32
}

/// Roll `levels` level-ups for a whole stat block, then apply caps
pub fn generate_random_stats<R: Rng + ?Sized>(
    base: &Stats,
    growth: &GrowthRates,
    levels: u32,
    caps: Option<&StatCaps>,
    rng: &mut R,
) -> Stats {
    let mut stats = *base;

    for stat in Stat::ALL {
        let mut value = calculate_growth(base.get(stat), growth.get(stat), levels, rng);
        if let Some(cap) = caps.and_then(|caps| caps.get(&stat)) {
            value = value.min(*cap);
        }
        stats.set(stat, value);
    }

    stats
}
