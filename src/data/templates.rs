//! Character templates and the character factory
//!
//! A template is a class plus level-1 base stats and growth rates. The
//! numbers are derived from the class itself: its first matching tag
//! picks a stat profile, promotion adds a bonus, and a handful of class
//! names get a specialist tweak on top.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::Rng;

use crate::combat::character::Character;
use crate::combat::class::CharacterClass;
use crate::combat::stats::{GrowthRates, Stats};
use crate::core::error::{Result, SimError};
use crate::data::classes::ClassCatalog;
use crate::data::growth::generate_random_stats;
use crate::data::weapons::WeaponCatalog;

/// Short names kept for older scripts
const DEFAULT_ALIASES: &[(&str, &str)] = &[("Lord", "Lord (Roy)")];

/// Base stat archetype, chosen by class tag in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatProfile {
    Magic,
    Armored,
    Flying,
    Horseback,
    Royal,
    Monster,
    Infantry,
}

impl StatProfile {
    pub fn for_class(class: &CharacterClass) -> Self {
        [
            ("Magic", StatProfile::Magic),
            ("Armored", StatProfile::Armored),
            ("Flying", StatProfile::Flying),
            ("Horseback", StatProfile::Horseback),
            ("Royal", StatProfile::Royal),
            ("Monster", StatProfile::Monster),
        ]
        .into_iter()
        .find(|(tag, _)| class.is_type(tag))
        .map_or(StatProfile::Infantry, |(_, profile)| profile)
    }

    /// Level-1 stats, with the promotion bonus when `promoted`
    pub fn base_stats(&self, promoted: bool) -> Stats {
        // [hp, str, mag, skl, spd, lck, def, res] and the promotion bonus for each
        let (base, bonus): ([i32; 8], [i32; 8]) = match self {
            StatProfile::Magic => ([16, 2, 5, 4, 5, 4, 2, 5], [2, 0, 3, 2, 2, 0, 1, 3]),
            StatProfile::Armored => ([22, 8, 0, 4, 2, 2, 12, 1], [4, 3, 0, 2, 1, 0, 4, 2]),
            StatProfile::Flying => ([18, 5, 1, 6, 9, 5, 5, 5], [3, 3, 0, 2, 3, 0, 2, 2]),
            StatProfile::Horseback => ([20, 6, 1, 5, 6, 3, 6, 2], [3, 3, 0, 2, 2, 0, 3, 2]),
            StatProfile::Royal => ([19, 5, 2, 7, 8, 7, 5, 3], [3, 3, 0, 3, 3, 0, 2, 2]),
            StatProfile::Monster => ([25, 9, 0, 3, 4, 0, 7, 3], [5, 4, 0, 2, 1, 0, 3, 2]),
            StatProfile::Infantry => ([20, 6, 0, 6, 7, 4, 5, 2], [3, 3, 0, 2, 2, 0, 2, 1]),
        };

        let value = |i: usize| base[i] + if promoted { bonus[i] } else { 0 };
        Stats {
            hp: value(0),
            strength: value(1),
            magic: value(2),
            skill: value(3),
            speed: value(4),
            luck: value(5),
            defense: value(6),
            resistance: value(7),
        }
    }
}

/// Growth rates shared by every profile; magic users grow MAG and RES faster
fn base_growth(class: &CharacterClass) -> GrowthRates {
    let promoted = if class.promoted { 0.1 } else { 0.0 };
    let magic = class.is_type("Magic");

    GrowthRates {
        hp: 0.7 + promoted,
        strength: 0.4 + promoted,
        magic: if magic { 0.3 } else { 0.1 },
        skill: 0.4 + promoted,
        speed: 0.4 + promoted,
        luck: 0.3,
        defense: 0.3 + promoted,
        resistance: if magic { 0.3 } else { 0.2 },
    }
}

/// Name-based specialist tweaks (substring match, so "Myrmidon (F)" counts)
fn apply_specialty(name: &str, stats: &mut Stats, growth: &mut GrowthRates) {
    if name.contains("Myrmidon") || name.contains("Swordmaster") {
        stats.speed += 2;
        stats.skill += 2;
        growth.speed += 0.15;
        growth.skill += 0.15;
    }

    if name.contains("Berserker") {
        stats.strength += 3;
        growth.strength += 0.2;
    }

    if name.contains("Bishop") || name.contains("Sage") {
        stats.magic += 2;
        stats.resistance += 2;
    }
}

/// Class, level-1 stats and growth rates
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterTemplate {
    pub class: Arc<CharacterClass>,
    pub stats: Stats,
    pub growth_rates: GrowthRates,
}

impl CharacterTemplate {
    pub fn new(class: Arc<CharacterClass>, stats: Stats, growth_rates: GrowthRates) -> Self {
        Self {
            class,
            stats,
            growth_rates,
        }
    }

    /// Derive stats and growths from the class tags and name
    pub fn derive(class: Arc<CharacterClass>) -> Self {
        let mut stats = StatProfile::for_class(&class).base_stats(class.promoted);
        let mut growth_rates = base_growth(&class);
        apply_specialty(&class.name, &mut stats, &mut growth_rates);

        Self {
            class,
            stats,
            growth_rates,
        }
    }

    /// Stats at `level`: level 1 is the base block, every level above rolls growth
    pub fn stats_at_level<R: Rng + ?Sized>(&self, level: u32, rng: &mut R) -> Stats {
        if level > 1 {
            generate_random_stats(&self.stats, &self.growth_rates, level - 1, None, rng)
        } else {
            self.stats
        }
    }
}

/// Templates keyed by name, with alias resolution
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: BTreeMap<String, CharacterTemplate>,
    aliases: BTreeMap<String, String>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// One derived template per class, plus the default aliases whose target exists
    pub fn from_classes(classes: &ClassCatalog) -> Self {
        let mut catalog = Self::new();
        for class in classes.iter() {
            catalog.insert(class.name.clone(), CharacterTemplate::derive(Arc::clone(class)));
        }

        for (alias, target) in DEFAULT_ALIASES {
            if catalog.templates.contains_key(*target) {
                catalog.alias(*alias, *target);
            }
        }

        catalog
    }

    pub fn builtin() -> Result<Self> {
        Ok(Self::from_classes(&ClassCatalog::builtin()?))
    }

    pub fn insert(&mut self, name: impl Into<String>, template: CharacterTemplate) {
        self.templates.insert(name.into(), template);
    }

    /// Make `alias` resolve to `target`. Aliases win over same-named templates.
    pub fn alias(&mut self, alias: impl Into<String>, target: impl Into<String>) {
        self.aliases.insert(alias.into(), target.into());
    }

    pub fn get(&self, name: &str) -> Option<&CharacterTemplate> {
        let name = self.aliases.get(name).map_or(name, String::as_str);
        self.templates.get(name)
    }

    pub fn require(&self, name: &str) -> Result<&CharacterTemplate> {
        self.get(name)
            .ok_or_else(|| SimError::UnknownTemplate(name.to_string()))
    }

    /// Template and alias names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .templates
            .keys()
            .chain(self.aliases.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Build a character from a template at the given level
    ///
    /// Levels above 1 roll `level - 1` level-ups. The weapon, if named,
    /// is a fresh copy from `weapons`.
    pub fn create_character<R: Rng + ?Sized>(
        &self,
        name: &str,
        template: &str,
        level: u32,
        weapon_name: Option<&str>,
        weapons: &WeaponCatalog,
        rng: &mut R,
    ) -> Result<Character> {
        let template = self.require(template)?;
        let weapon = weapon_name.map(|w| weapons.equip(w)).transpose()?;
        let stats = template.stats_at_level(level, rng);

        tracing::debug!(
            "Created {} ({}) at level {}: {}",
            name,
            template.class.name,
            level,
            stats
        );

        Ok(Character::new(name, Arc::clone(&template.class), stats, weapon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn templates() -> TemplateCatalog {
        TemplateCatalog::builtin().unwrap()
    }

    #[test]
    fn test_profile_selection_order() {
        let troubadour = CharacterClass::new("Troubadour", 7, ["Horseback", "Mounted", "Magic"]);
        assert_eq!(StatProfile::for_class(&troubadour), StatProfile::Magic);

        let great_lord = CharacterClass::new("Great Lord", 5, ["Armored", "Royal"]);
        assert_eq!(StatProfile::for_class(&great_lord), StatProfile::Armored);

        let gargoyle = CharacterClass::new("Gargoyle", 7, ["Monster", "Flying"]);
        assert_eq!(StatProfile::for_class(&gargoyle), StatProfile::Flying);

        let mercenary = CharacterClass::new("Mercenary", 5, ["Infantry"]);
        assert_eq!(StatProfile::for_class(&mercenary), StatProfile::Infantry);
    }

    #[test]
    fn test_knight_template() {
        let knight = templates().require("Knight").unwrap().clone();
        assert_eq!(knight.stats.hp, 22);
        assert_eq!(knight.stats.defense, 12);
        assert_eq!(knight.stats.speed, 2);
        assert_eq!(knight.growth_rates.hp, 0.7);
        assert_eq!(knight.growth_rates.resistance, 0.2);
    }

    #[test]
    fn test_promoted_bonus() {
        let general = templates().require("General").unwrap().clone();
        assert_eq!(general.stats.hp, 26);
        assert_eq!(general.stats.defense, 16);
        assert_eq!(general.stats.luck, 2);
        assert!((general.growth_rates.hp - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_specialist_adjustments() {
        let catalog = templates();

        let swordmaster = catalog.require("Swordmaster").unwrap();
        // promoted infantry 9 speed, plus 2
        assert_eq!(swordmaster.stats.speed, 11);
        assert!((swordmaster.growth_rates.speed - 0.65).abs() < 1e-9);

        let berserker = catalog.require("Berserker").unwrap();
        assert_eq!(berserker.stats.strength, 12);

        let sage = catalog.require("Sage").unwrap();
        assert_eq!(sage.stats.magic, 10);
        assert_eq!(sage.stats.resistance, 10);
        assert!((sage.growth_rates.magic - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_lord_alias() {
        let catalog = templates();
        let lord = catalog.require("Lord").unwrap();
        assert_eq!(lord.class.name, "Lord (Roy)");
        assert!(catalog.names().contains(&"Lord"));
    }

    #[test]
    fn test_unknown_template() {
        let err = templates().require("Dread Fighter").unwrap_err();
        assert_eq!(err.to_string(), "Template 'Dread Fighter' not found");
    }

    #[test]
    fn test_create_level_one_copies_base() {
        let catalog = templates();
        let weapons = WeaponCatalog::builtin().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let unit = catalog
            .create_character("Oswin", "Knight", 1, Some("Iron Lance"), &weapons, &mut rng)
            .unwrap();
        assert_eq!(unit.stats, catalog.require("Knight").unwrap().stats);
        assert_eq!(unit.current_hp, 22);
        assert_eq!(unit.weapon().map(|w| w.name.as_str()), Some("Iron Lance"));
        assert!(unit.class.is_type("Armored"));
    }

    #[test]
    fn test_create_higher_level_grows() {
        let catalog = templates();
        let weapons = WeaponCatalog::builtin().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let base = catalog.require("Cavalier").unwrap().stats;
        let unit = catalog
            .create_character("Lance", "Cavalier", 20, None, &weapons, &mut rng)
            .unwrap();
        for stat in crate::combat::stats::Stat::ALL {
            assert!(unit.stats.get(stat) >= base.get(stat));
            assert!(unit.stats.get(stat) <= base.get(stat) + 19);
        }
        assert!(unit.weapon().is_none());
    }

    #[test]
    fn test_create_with_unknown_weapon() {
        let catalog = templates();
        let weapons = WeaponCatalog::builtin().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let result = catalog.create_character("Roy", "Lord", 1, Some("Falchion"), &weapons, &mut rng);
        assert!(matches!(result, Err(SimError::UnknownWeapon(name)) if name == "Falchion"));
    }
}
