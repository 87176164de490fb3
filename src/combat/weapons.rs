//! Weapons and their combat attributes
//!
//! A weapon is a value: each wielder owns its own copy, so remaining uses
//! never leak between characters that picked the same catalog entry.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::combat::class::CharacterClass;
use crate::combat::constants::{EFFECTIVE_MULTIPLIER, NEUTRAL_MULTIPLIER};
use crate::core::error::{Result, SimError};

/// Weapon category - drives the triangle and the damage formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WeaponCategory {
    Sword,
    Lance,
    Axe,
    Bow,
    /// Offensive magic
    Tome,
    /// Support magic
    Staff,
    /// Dragonstones and other oddities
    Other,
}

impl WeaponCategory {
    pub const ALL: [WeaponCategory; 7] = [
        WeaponCategory::Sword,
        WeaponCategory::Lance,
        WeaponCategory::Axe,
        WeaponCategory::Bow,
        WeaponCategory::Tome,
        WeaponCategory::Staff,
        WeaponCategory::Other,
    ];

    /// Magic categories hit with MAG against RES
    pub fn is_magical(&self) -> bool {
        matches!(self, WeaponCategory::Tome | WeaponCategory::Staff)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponCategory::Sword => "Sword",
            WeaponCategory::Lance => "Lance",
            WeaponCategory::Axe => "Axe",
            WeaponCategory::Bow => "Bow",
            WeaponCategory::Tome => "Tome",
            WeaponCategory::Staff => "Staff",
            WeaponCategory::Other => "Other",
        }
    }
}

impl fmt::Display for WeaponCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeaponCategory {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        WeaponCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| SimError::InvalidWeaponCategory(s.to_string()))
    }
}

/// Inclusive attack range in tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RangeBounds")]
pub struct WeaponRange {
    min: u32,
    max: u32,
}

impl WeaponRange {
    /// Both bounds must be positive and `min <= max`
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min == 0 || min > max {
            return Err(SimError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Adjacent only (1-1)
    pub fn melee() -> Self {
        Self { min: 1, max: 1 }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn contains(&self, distance: u32) -> bool {
        self.min <= distance && distance <= self.max
    }
}

#[derive(Deserialize)]
struct RangeBounds {
    min: u32,
    max: u32,
}

impl TryFrom<RangeBounds> for WeaponRange {
    type Error = SimError;

    fn try_from(bounds: RangeBounds) -> Result<Self> {
        Self::new(bounds.min, bounds.max)
    }
}

impl Default for WeaponRange {
    fn default() -> Self {
        Self::melee()
    }
}

/// A wieldable weapon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WeaponFields")]
pub struct Weapon {
    pub name: String,
    pub category: WeaponCategory,
    pub might: i32,
    pub hit: i32,
    pub crit: i32,
    pub range: WeaponRange,
    max_uses: Option<u32>,
    remaining_uses: Option<u32>,
    /// Class tags this weapon deals triple damage against
    pub effective_against: BTreeSet<String>,
}

impl Weapon {
    /// Melee weapon with unlimited uses and no effectiveness
    pub fn new(name: impl Into<String>, category: WeaponCategory, might: i32, hit: i32, crit: i32) -> Self {
        Self {
            name: name.into(),
            category,
            might,
            hit,
            crit,
            range: WeaponRange::melee(),
            max_uses: None,
            remaining_uses: None,
            effective_against: BTreeSet::new(),
        }
    }

    /// Construct from a category name, rejecting anything outside the fixed set
    pub fn from_category_name(
        name: impl Into<String>,
        category: &str,
        might: i32,
        hit: i32,
        crit: i32,
    ) -> Result<Self> {
        let category = category.parse()?;
        Ok(Self::new(name, category, might, hit, crit))
    }

    pub fn with_range(mut self, range: WeaponRange) -> Self {
        self.range = range;
        self
    }

    /// Limit the weapon to `uses` strikes; starts fully charged
    pub fn with_uses(mut self, uses: u32) -> Self {
        self.max_uses = Some(uses);
        self.remaining_uses = Some(uses);
        self
    }

    pub fn effective_against<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.effective_against.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn is_magical(&self) -> bool {
        self.category.is_magical()
    }

    pub fn is_physical(&self) -> bool {
        !self.is_magical()
    }

    /// None means unlimited
    pub fn max_uses(&self) -> Option<u32> {
        self.max_uses
    }

    pub fn remaining_uses(&self) -> Option<u32> {
        self.remaining_uses
    }

    pub fn is_broken(&self) -> bool {
        self.remaining_uses == Some(0)
    }

    /// Spend one use. Returns false (and changes nothing) if already broken.
    pub fn use_once(&mut self) -> bool {
        match self.remaining_uses {
            None => true,
            Some(0) => false,
            Some(n) => {
                self.remaining_uses = Some(n - 1);
                true
            }
        }
    }

    /// Restore remaining uses to the maximum
    pub fn repair(&mut self) {
        self.remaining_uses = self.max_uses;
    }

    /// Any of the class's tags is in this weapon's effective-against set
    pub fn is_effective_against(&self, class: &CharacterClass) -> bool {
        self.effective_against
            .iter()
            .any(|tag| class.is_type(tag))
    }

    pub fn effectiveness_multiplier(&self, class: &CharacterClass) -> f64 {
        if self.is_effective_against(class) {
            EFFECTIVE_MULTIPLIER
        } else {
            NEUTRAL_MULTIPLIER
        }
    }
}

/// Serialized form of `Weapon`, checked before it becomes one
#[derive(Deserialize)]
struct WeaponFields {
    name: String,
    category: WeaponCategory,
    might: i32,
    hit: i32,
    crit: i32,
    #[serde(default)]
    range: WeaponRange,
    #[serde(default)]
    max_uses: Option<u32>,
    #[serde(default)]
    remaining_uses: Option<u32>,
    #[serde(default)]
    effective_against: BTreeSet<String>,
}

impl TryFrom<WeaponFields> for Weapon {
    type Error = SimError;

    fn try_from(fields: WeaponFields) -> Result<Self> {
        let remaining_uses = match (fields.max_uses, fields.remaining_uses) {
            (None, None) => None,
            (Some(max), None) => Some(max),
            (Some(max), Some(left)) if left <= max => Some(left),
            (max, Some(remaining)) => {
                return Err(SimError::InvalidUses {
                    name: fields.name,
                    remaining,
                    max,
                })
            }
        };

        Ok(Self {
            name: fields.name,
            category: fields.category,
            might: fields.might,
            hit: fields.hit,
            crit: fields.crit,
            range: fields.range,
            max_uses: fields.max_uses,
            remaining_uses,
            effective_against: fields.effective_against,
        })
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, Mt {}, Hit {}, Crit {}, Rng {}-{})",
            self.name,
            self.category,
            self.might,
            self.hit,
            self.crit,
            self.range.min(),
            self.range.max()
        )
    }
}
