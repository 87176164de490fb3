//! Unit stats and growth rates
//!
//! Any stat left out of a data file is zero.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The eight combat stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Hp,
    Str,
    Mag,
    Skl,
    Spd,
    Lck,
    Def,
    Res,
}

impl Stat {
    pub const ALL: [Stat; 8] = [
        Stat::Hp,
        Stat::Str,
        Stat::Mag,
        Stat::Skl,
        Stat::Spd,
        Stat::Lck,
        Stat::Def,
        Stat::Res,
    ];

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Stat::Hp => "hp",
            Stat::Str => "str",
            Stat::Mag => "mag",
            Stat::Skl => "skl",
            Stat::Spd => "spd",
            Stat::Lck => "lck",
            Stat::Def => "def",
            Stat::Res => "res",
        }
    }
}

/// Stat block. Serialized with the short keys (`hp`, `str`, `mag`...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub hp: i32,
    #[serde(rename = "str")]
    pub strength: i32,
    #[serde(rename = "mag")]
    pub magic: i32,
    #[serde(rename = "skl")]
    pub skill: i32,
    #[serde(rename = "spd")]
    pub speed: i32,
    #[serde(rename = "lck")]
    pub luck: i32,
    #[serde(rename = "def")]
    pub defense: i32,
    #[serde(rename = "res")]
    pub resistance: i32,
}

impl Stats {
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Str => self.strength,
            Stat::Mag => self.magic,
            Stat::Skl => self.skill,
            Stat::Spd => self.speed,
            Stat::Lck => self.luck,
            Stat::Def => self.defense,
            Stat::Res => self.resistance,
        }
    }

    pub fn get_mut(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Hp => &mut self.hp,
            Stat::Str => &mut self.strength,
            Stat::Mag => &mut self.magic,
            Stat::Skl => &mut self.skill,
            Stat::Spd => &mut self.speed,
            Stat::Lck => &mut self.luck,
            Stat::Def => &mut self.defense,
            Stat::Res => &mut self.resistance,
        }
    }

    pub fn set(&mut self, stat: Stat, value: i32) {
        *self.get_mut(stat) = value;
    }

    /// Builder-style setter, handy for literals in tests and demos
    pub fn with(mut self, stat: Stat, value: i32) -> Self {
        self.set(stat, value);
        self
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = Stat::ALL
            .iter()
            .map(|stat| format!("{} {}", stat.abbreviation().to_uppercase(), self.get(*stat)))
            .collect();
        f.write_str(&parts.join(" / "))
    }
}

/// Per-level growth chance for each stat, as a fraction (0.7 = 70%)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthRates {
    pub hp: f64,
    #[serde(rename = "str")]
    pub strength: f64,
    #[serde(rename = "mag")]
    pub magic: f64,
    #[serde(rename = "skl")]
    pub skill: f64,
    #[serde(rename = "spd")]
    pub speed: f64,
    #[serde(rename = "lck")]
    pub luck: f64,
    #[serde(rename = "def")]
    pub defense: f64,
    #[serde(rename = "res")]
    pub resistance: f64,
}

impl GrowthRates {
    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Str => self.strength,
            Stat::Mag => self.magic,
            Stat::Skl => self.skill,
            Stat::Spd => self.speed,
            Stat::Lck => self.luck,
            Stat::Def => self.defense,
            Stat::Res => self.resistance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_default_to_zero() {
        let stats: Stats = toml::from_str("hp = 40\nstr = 10\ndef = 8\nspd = 10").unwrap();
        assert_eq!(stats.hp, 40);
        assert_eq!(stats.strength, 10);
        assert_eq!(stats.magic, 0);
        assert_eq!(stats.luck, 0);
        assert_eq!(stats.resistance, 0);
    }

    #[test]
    fn test_get_set_roundtrip_per_stat() {
        let mut stats = Stats::default();
        for (i, stat) in Stat::ALL.iter().enumerate() {
            stats.set(*stat, i as i32 + 1);
        }
        assert_eq!(stats.hp, 1);
        assert_eq!(stats.speed, 5);
        assert_eq!(stats.resistance, 8);
        assert_eq!(stats.get(Stat::Lck), 6);
    }

    #[test]
    fn test_with_builder() {
        let stats = Stats::default().with(Stat::Skl, 13).with(Stat::Lck, 12);
        assert_eq!(stats.skill, 13);
        assert_eq!(stats.luck, 12);
    }

    #[test]
    fn test_display_lists_all_stats() {
        let stats = Stats::default().with(Stat::Hp, 20);
        let text = stats.to_string();
        assert!(text.starts_with("HP 20"));
        assert!(text.ends_with("RES 0"));
    }

    #[test]
    fn test_growth_rates_short_keys() {
        let growth: GrowthRates = toml::from_str("hp = 0.7\nspd = 0.55").unwrap();
        assert_eq!(growth.get(Stat::Hp), 0.7);
        assert_eq!(growth.get(Stat::Spd), 0.55);
        assert_eq!(growth.get(Stat::Mag), 0.0);
    }
}
