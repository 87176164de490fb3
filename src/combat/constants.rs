//! Combat rule constants - all fixed values in one place
//!
//! These are rules, not tuning knobs. Changing any of them changes the
//! game being simulated.

// Strike multipliers
pub const CRIT_MULTIPLIER: i32 = 3;
pub const EFFECTIVE_MULTIPLIER: f64 = 3.0;
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

// Weapon triangle (ADDITIVE)
pub const TRIANGLE_DAMAGE_BONUS: i32 = 1;
pub const TRIANGLE_HIT_BONUS: i32 = 15;

// Rate bounds
pub const MIN_RATE: i32 = 0;
pub const MAX_HIT_RATE: i32 = 100;

// Turn order
pub const FOLLOW_UP_SPEED_THRESHOLD: i32 = 5;
pub const ENGAGEMENT_DISTANCE: u32 = 1;
pub const MAX_ATTACKS_PER_ROUND: usize = 4;

// Dice
pub const ROLL_MIN: u32 = 1;
pub const ROLL_MAX: u32 = 100;
