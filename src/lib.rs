//! FE Combat Sim - Fire Emblem style combat round resolution
//!
//! `combat` holds the rules engine (damage, hit and crit formulas, weapon
//! triangle, the round state machine). `data` supplies weapons, classes
//! and character templates, and `prediction` runs forecasts and Monte
//! Carlo outcome estimates on top of the engine.

pub mod combat;
pub mod core;
pub mod data;
pub mod prediction;

pub use crate::core::error::{Result, SimError};
