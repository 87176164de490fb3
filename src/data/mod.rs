//! Data catalogs: weapons, classes, character templates and stat growth
//!
//! The built-in tables are compiled in from `data/*.toml`; the same
//! format can be loaded from disk to replace them.

pub mod classes;
pub mod growth;
pub mod templates;
pub mod weapons;

pub use classes::ClassCatalog;
pub use growth::{calculate_growth, generate_random_stats, StatCaps};
pub use templates::{CharacterTemplate, StatProfile, TemplateCatalog};
pub use weapons::{WeaponCatalog, WeaponDef};
