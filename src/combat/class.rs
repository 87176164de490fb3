//! Character classes
//!
//! Only the type tags matter to combat: they are what effective weapons
//! look for. Movement, promotion and weapon ranks ride along as data.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combat::weapons::WeaponCategory;

/// A unit archetype (Knight, Pegasus Knight, Sage...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterClass {
    pub name: String,
    pub movement: u32,
    /// Open tag set (Infantry, Armored, Flying, Mounted, Horseback, Dragon, ...)
    pub class_types: BTreeSet<String>,
    #[serde(default)]
    pub promoted: bool,
    #[serde(default)]
    pub weapons: Vec<WeaponCategory>,
    #[serde(default)]
    pub description: String,
}

impl CharacterClass {
    pub fn new<I, S>(name: impl Into<String>, movement: u32, class_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            movement,
            class_types: class_types.into_iter().map(Into::into).collect(),
            promoted: false,
            weapons: Vec::new(),
            description: String::new(),
        }
    }

    /// A class with no tags and the default movement of 5
    pub fn untyped(name: impl Into<String>) -> Self {
        Self::new(name, 5, std::iter::empty::<String>())
    }

    pub fn promoted(mut self) -> Self {
        self.promoted = true;
        self
    }

    pub fn with_weapons(mut self, weapons: impl IntoIterator<Item = WeaponCategory>) -> Self {
        self.weapons = weapons.into_iter().collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Exact, case-sensitive tag membership
    pub fn is_type(&self, class_type: &str) -> bool {
        self.class_types.contains(class_type)
    }

    pub fn can_wield(&self, category: WeaponCategory) -> bool {
        self.weapons.contains(&category)
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
