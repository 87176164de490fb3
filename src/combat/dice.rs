//! Percentile roll sources
//!
//! Every hit and critical check draws one d100. Any `rand::Rng` works as
//! a roll source; `FixedRolls` replays a scripted sequence instead.

use std::collections::VecDeque;

use rand::Rng;

use crate::combat::constants::{ROLL_MAX, ROLL_MIN};

/// Source of uniform percentile rolls
pub trait Dice {
    /// Roll a d100 (1-100 inclusive)
    fn roll_d100(&mut self) -> u32;
}

impl<R: Rng> Dice for R {
    fn roll_d100(&mut self) -> u32 {
        self.gen_range(ROLL_MIN..=ROLL_MAX)
    }
}

/// Scripted rolls, consumed front to back
///
/// Once the script runs out every further roll returns `fallback`.
#[derive(Debug, Clone)]
pub struct FixedRolls {
    rolls: VecDeque<u32>,
    fallback: u32,
}

impl FixedRolls {
    /// Script the given rolls, then fall back to 100 (misses anything below a 100% rate)
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self::with_fallback(rolls, ROLL_MAX)
    }

    pub fn with_fallback(rolls: impl IntoIterator<Item = u32>, fallback: u32) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback: fallback.clamp(ROLL_MIN, ROLL_MAX),
        }
    }

    /// Every roll is a 1: all strikes with a positive rate land and crit
    pub fn always_lowest() -> Self {
        Self::with_fallback([], ROLL_MIN)
    }

    /// Every roll is a 100: only 100% rates land, no crits below 100
    pub fn always_highest() -> Self {
        Self::with_fallback([], ROLL_MAX)
    }

    /// Rolls still queued before the fallback takes over
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for FixedRolls {
    fn roll_d100(&mut self) -> u32 {
        self.rolls.pop_front().unwrap_or(self.fallback)
    }
}
