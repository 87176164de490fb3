//! Class catalog
//!
//! Classes are loaded once and shared: every character holds an
//! `Arc<CharacterClass>` into the catalog.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::combat::class::CharacterClass;
use crate::combat::weapons::WeaponCategory;
use crate::core::error::{Result, SimError};

const BUILTIN_CLASSES: &str = include_str!("../../data/classes.toml");

#[derive(Debug, Deserialize)]
struct ClassFile {
    #[serde(default)]
    class: Vec<CharacterClass>,
}

/// Classes keyed by name
#[derive(Debug, Clone, Default)]
pub struct ClassCatalog {
    classes: BTreeMap<String, Arc<CharacterClass>>,
}

impl ClassCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The seven basic classes
    pub fn basic() -> Self {
        use WeaponCategory::*;

        let mut catalog = Self::new();
        catalog.insert(CharacterClass::new("Infantry", 5, ["Infantry"]).with_weapons([Sword, Lance, Axe]));
        catalog.insert(CharacterClass::new("Knight", 4, ["Armored", "Infantry"]).with_weapons([Lance]));
        catalog.insert(CharacterClass::new("Cavalier", 7, ["Horseback", "Mounted"]).with_weapons([Sword, Lance]));
        catalog.insert(CharacterClass::new("Pegasus Knight", 7, ["Flying", "Mounted"]).with_weapons([Lance]));
        catalog.insert(
            CharacterClass::new("Wyvern Rider", 7, ["Flying", "Mounted", "Dragon"]).with_weapons([Lance]),
        );
        catalog.insert(CharacterClass::new("Mage", 5, ["Infantry", "Magic"]).with_weapons([Tome]));
        catalog.insert(CharacterClass::new("Lord", 5, ["Infantry", "Royal"]).with_weapons([Sword]));
        catalog
    }

    /// Basic classes plus the full GBA roster
    pub fn builtin() -> Result<Self> {
        Self::parse_toml(BUILTIN_CLASSES)
    }

    pub fn parse_toml(content: &str) -> Result<Self> {
        let file: ClassFile = toml::from_str(content)?;

        let mut catalog = Self::new();
        for class in file.class {
            catalog.insert(class);
        }

        tracing::debug!("Parsed {} classes", catalog.len());
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::parse_toml(&content)?;
        tracing::debug!("Loaded class table from {}", path.display());
        Ok(catalog)
    }

    /// Add or replace a class, returning the shared handle
    pub fn insert(&mut self, class: CharacterClass) -> Arc<CharacterClass> {
        let class = Arc::new(class);
        self.classes.insert(class.name.clone(), Arc::clone(&class));
        class
    }

    pub fn get(&self, name: &str) -> Option<Arc<CharacterClass>> {
        self.classes.get(name).cloned()
    }

    pub fn require(&self, name: &str) -> Result<Arc<CharacterClass>> {
        self.get(name)
            .ok_or_else(|| SimError::UnknownClass(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CharacterClass>> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_classes() {
        let catalog = ClassCatalog::basic();
        assert_eq!(catalog.len(), 7);

        let wyvern = catalog.get("Wyvern Rider").unwrap();
        assert_eq!(wyvern.movement, 7);
        assert!(wyvern.is_type("Dragon"));
        assert!(catalog.get("Knight").unwrap().is_type("Armored"));
    }

    #[test]
    fn test_builtin_roster_covers_basic_classes() {
        let builtin = ClassCatalog::builtin().unwrap();
        for name in ClassCatalog::basic().names() {
            let class = builtin.get(name).unwrap();
            let basic = ClassCatalog::basic().get(name).unwrap();
            assert_eq!(class.class_types, basic.class_types, "{}", name);
        }
    }

    #[test]
    fn test_builtin_promoted_flag() {
        let catalog = ClassCatalog::builtin().unwrap();
        assert!(catalog.get("Swordmaster").unwrap().promoted);
        assert!(!catalog.get("Myrmidon").unwrap().promoted);
        assert!(catalog.get("Paladin").unwrap().can_wield(WeaponCategory::Axe));
    }

    #[test]
    fn test_shared_handles() {
        let catalog = ClassCatalog::basic();
        let a = catalog.get("Mage").unwrap();
        let b = catalog.get("Mage").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_require_unknown_class() {
        let catalog = ClassCatalog::basic();
        assert!(matches!(
            catalog.require("Dread Fighter"),
            Err(SimError::UnknownClass(name)) if name == "Dread Fighter"
        ));
    }

    #[test]
    fn test_parse_minimal_class() {
        let catalog = ClassCatalog::parse_toml(
            r#"
            [[class]]
            name = "Villager"
            movement = 5
            class_types = []
            "#,
        )
        .unwrap();
        let villager = catalog.require("Villager").unwrap();
        assert!(!villager.promoted);
        assert!(villager.weapons.is_empty());
    }

    #[test]
    fn test_unknown_weapon_rank_fails_parse() {
        let result = ClassCatalog::parse_toml(
            r#"
            [[class]]
            name = "Gunner"
            movement = 5
            class_types = ["Infantry"]
            weapons = ["Gun"]
            "#,
        );
        assert!(matches!(result, Err(SimError::TomlError(_))));
    }
}
