pub mod config;
pub mod error;

pub use config::SimulatorConfig;
pub use error::{Result, SimError};
