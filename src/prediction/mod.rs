//! Forecasts and Monte Carlo outcome prediction built on the round engine

pub mod forecast;
pub mod monte_carlo;

pub use forecast::{predict_damage, DamageForecast};
pub use monte_carlo::{predict_battle_outcome, OutcomeStats, PredictionOptions};
