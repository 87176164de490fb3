//! Weapon catalog
//!
//! Weapons are defined in TOML as `[[weapon]]` tables:
//!
//! ```toml
//! [[weapon]]
//! name = "Armorslayer"
//! category = "Sword"
//! might = 8
//! hit = 80
//! crit = 0
//! range = [1, 1]
//! uses = 18
//! effective_against = ["Armored"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::combat::weapons::{Weapon, WeaponCategory, WeaponRange};
use crate::core::error::{Result, SimError};

const BUILTIN_WEAPONS: &str = include_str!("../../data/weapons.toml");

/// Weapon as written in a data file
#[derive(Debug, Clone, Deserialize)]
pub struct WeaponDef {
    pub name: String,
    pub category: String,
    pub might: i32,
    pub hit: i32,
    #[serde(default)]
    pub crit: i32,
    #[serde(default = "default_range")]
    pub range: [u32; 2],
    #[serde(default)]
    pub uses: Option<u32>,
    #[serde(default)]
    pub effective_against: Vec<String>,
}

fn default_range() -> [u32; 2] {
    [1, 1]
}

impl WeaponDef {
    /// Validate category and range and build the weapon
    pub fn into_weapon(self) -> Result<Weapon> {
        let category: WeaponCategory = self.category.parse()?;
        let range = WeaponRange::new(self.range[0], self.range[1])?;

        let mut weapon = Weapon::new(self.name, category, self.might, self.hit, self.crit)
            .with_range(range)
            .effective_against(self.effective_against);
        if let Some(uses) = self.uses {
            weapon = weapon.with_uses(uses);
        }
        Ok(weapon)
    }
}

#[derive(Debug, Deserialize)]
struct WeaponFile {
    #[serde(default)]
    weapon: Vec<WeaponDef>,
}

/// Weapons keyed by name
#[derive(Debug, Clone, Default)]
pub struct WeaponCatalog {
    weapons: BTreeMap<String, Weapon>,
}

impl WeaponCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in GBA weapon table
    pub fn builtin() -> Result<Self> {
        Self::parse_toml(BUILTIN_WEAPONS)
    }

    /// Parse a weapon table. One bad entry fails the whole table.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let file: WeaponFile = toml::from_str(content)?;

        let mut catalog = Self::new();
        for def in file.weapon {
            catalog.insert(def.into_weapon()?);
        }

        tracing::debug!("Parsed {} weapons", catalog.len());
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::parse_toml(&content)?;
        tracing::debug!("Loaded weapon table from {}", path.display());
        Ok(catalog)
    }

    /// Add or replace a weapon
    pub fn insert(&mut self, weapon: Weapon) -> Option<Weapon> {
        self.weapons.insert(weapon.name.clone(), weapon)
    }

    pub fn get(&self, name: &str) -> Option<&Weapon> {
        self.weapons.get(name)
    }

    /// A fresh copy for a wielder, with its own use counter
    pub fn equip(&self, name: &str) -> Result<Weapon> {
        self.get(name)
            .cloned()
            .ok_or_else(|| SimError::UnknownWeapon(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.weapons.contains_key(name)
    }

    /// Weapon names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.weapons.keys().map(String::as_str)
    }

    pub fn by_category(&self, category: WeaponCategory) -> Vec<&Weapon> {
        self.weapons
            .values()
            .filter(|w| w.category == category)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Weapon> {
        self.weapons.values()
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }
}
