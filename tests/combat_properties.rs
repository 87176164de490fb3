//! Property tests for the combat formulas and the round state machine

use std::sync::Arc;

use fe_combat_sim::combat::constants::MAX_ATTACKS_PER_ROUND;
use fe_combat_sim::combat::{
    crit_rate, get_advantage, hit_rate, Battle, Character, CharacterClass, FixedRolls, Stats,
    Terrain, Weapon, WeaponCategory, WeaponRange,
};
use proptest::prelude::*;

fn category() -> impl Strategy<Value = WeaponCategory> {
    prop::sample::select(WeaponCategory::ALL.to_vec())
}

fn stats() -> impl Strategy<Value = Stats> {
    (1..60i32, 0..30i32, 0..30i32, 0..30i32, 0..30i32, 0..30i32, 0..30i32, 0..30i32).prop_map(
        |(hp, strength, magic, skill, speed, luck, defense, resistance)| Stats {
            hp,
            strength,
            magic,
            skill,
            speed,
            luck,
            defense,
            resistance,
        },
    )
}

fn weapon() -> impl Strategy<Value = Option<Weapon>> {
    prop::option::of(
        (category(), 0..20i32, 0..120i32, 0..50i32, 1..3u32, 0..2u32, any::<bool>()).prop_map(
            |(category, might, hit, crit, min, extra, armor_killer)| {
                let mut weapon = Weapon::new("Test", category, might, hit, crit)
                    .with_range(WeaponRange::new(min, min + extra).unwrap());
                if armor_killer {
                    weapon = weapon.effective_against(["Armored"]);
                }
                weapon
            },
        ),
    )
}

fn character(name: &'static str) -> impl Strategy<Value = Character> {
    (stats(), weapon(), any::<bool>()).prop_map(move |(stats, weapon, armored)| {
        let tags: &[&str] = if armored { &["Armored", "Infantry"] } else { &["Infantry"] };
        let class = Arc::new(CharacterClass::new("Class", 5, tags.iter().copied()));
        Character::new(name, class, stats, weapon)
    })
}

proptest! {
    #[test]
    fn triangle_is_antisymmetric(a in category(), b in category()) {
        prop_assert_eq!(get_advantage(a, b).value(), -get_advantage(b, a).value());
        prop_assert_eq!(get_advantage(a, a).value(), 0);
    }

    #[test]
    fn rates_stay_in_bounds(
        actor in character("A"),
        target in character("T"),
        avoid in 0..60i32,
    ) {
        let hit = hit_rate(&actor, &target, &Terrain::with_avoid(avoid));
        prop_assert!((0..=100).contains(&hit));
        prop_assert!(crit_rate(&actor, &target) >= 0);
    }

    #[test]
    fn critical_is_triple_base(actor in character("A"), target in character("T")) {
        let base = actor.calculate_damage(&target);
        prop_assert!(base >= 0);

        let mut target = target;
        let mut actor = actor;
        // Hit and crit rolls of 1 always land when both rates are positive
        prop_assume!(hit_rate(&actor, &target, &Terrain::default()) > 0);
        prop_assume!(crit_rate(&actor, &target) > 0);

        let hp_before = target.current_hp;
        let summary = Battle::new(&mut actor, &mut target)
            .resolve_round(&mut FixedRolls::new([1, 1]));
        let first = &summary.attacks[0];
        prop_assert!(first.critical);
        prop_assert_eq!(first.damage, base * 3);
        prop_assert_eq!(first.target_hp_remaining, (hp_before - base * 3).max(0));
    }

    #[test]
    fn round_has_one_to_four_entries(
        attacker in character("A"),
        defender in character("D"),
        rolls in prop::collection::vec(1..=100u32, 0..8),
    ) {
        let mut attacker = attacker;
        let mut defender = defender;
        let summary = Battle::new(&mut attacker, &mut defender)
            .resolve_round(&mut FixedRolls::new(rolls));

        prop_assert!((1..=MAX_ATTACKS_PER_ROUND).contains(&summary.attacks.len()));
        prop_assert!(attacker.current_hp >= 0);
        prop_assert!(defender.current_hp >= 0);
        if summary.victor.is_none() {
            prop_assert!(attacker.is_alive() && defender.is_alive());
        }
    }
}
