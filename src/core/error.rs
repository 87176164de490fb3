use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid weapon category: {0}")]
    InvalidWeaponCategory(String),

    #[error("Invalid weapon range: min {min} exceeds max {max} or is zero")]
    InvalidRange { min: u32, max: u32 },

    #[error("{name}: remaining uses {remaining} exceed maximum {max:?}")]
    InvalidUses {
        name: String,
        remaining: u32,
        max: Option<u32>,
    },

    #[error("Weapon not found: {0}")]
    UnknownWeapon(String),

    #[error("Class not found: {0}")]
    UnknownClass(String),

    #[error("Template '{0}' not found")]
    UnknownTemplate(String),

    #[error("{0} has no weapon equipped")]
    NoWeaponEquipped(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
