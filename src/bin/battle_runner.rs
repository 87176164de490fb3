//! Headless Battle Runner
//!
//! Builds two characters from templates and either resolves a single
//! round or runs a Monte Carlo prediction. Results go to stdout, logs to
//! stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use fe_combat_sim::combat::{Battle, Character, RoundSummary, Stats, Terrain};
use fe_combat_sim::core::SimulatorConfig;
use fe_combat_sim::data::{ClassCatalog, TemplateCatalog, WeaponCatalog};
use fe_combat_sim::prediction::{
    predict_battle_outcome, predict_damage, DamageForecast, OutcomeStats, PredictionOptions,
};
use fe_combat_sim::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

/// Headless Battle Runner - predict the outcome of a one-on-one fight
#[derive(Parser, Debug)]
#[command(name = "battle_runner")]
#[command(about = "Resolve a combat round or predict a battle outcome between two units")]
struct Args {
    /// Attacker's name
    #[arg(long, default_value = "Roy")]
    attacker: String,

    /// Attacker's template name; every class has a template of the same name
    #[arg(long, default_value = "Lord")]
    attacker_template: String,

    /// Attacker's weapon
    #[arg(long, default_value = "Iron Sword")]
    attacker_weapon: String,

    #[arg(long, default_value_t = 1)]
    attacker_level: u32,

    /// Defender's name
    #[arg(long, default_value = "Bandit")]
    defender: String,

    /// Defender's template name; every class has a template of the same name
    #[arg(long, default_value = "Brigand")]
    defender_template: String,

    /// Defender's weapon
    #[arg(long, default_value = "Iron Axe")]
    defender_weapon: String,

    #[arg(long, default_value_t = 1)]
    defender_level: u32,

    /// Simulated battles (overrides config)
    #[arg(long)]
    iterations: Option<u32>,

    /// Rounds per simulated battle before it counts as a draw (overrides config)
    #[arg(long)]
    rounds: Option<u32>,

    /// Random seed for deterministic runs (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Flat terrain avoid bonus (overrides config)
    #[arg(long)]
    terrain_avoid: Option<i32>,

    /// Simulator config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Resolve one round and print its log instead of predicting
    #[arg(long)]
    single_round: bool,
}

#[derive(Serialize)]
struct CombatantReport {
    name: String,
    class: String,
    level: u32,
    weapon: Option<String>,
    hp: i32,
    stats: Stats,
}

impl CombatantReport {
    fn new(character: &Character, level: u32) -> Self {
        Self {
            name: character.name.clone(),
            class: character.class.name.clone(),
            level,
            weapon: character.weapon().map(|w| w.name.clone()),
            hp: character.current_hp,
            stats: character.stats,
        }
    }
}

#[derive(Serialize)]
struct RunReport {
    seed: u64,
    attacker: CombatantReport,
    defender: CombatantReport,
    attacker_forecast: DamageForecast,
    defender_forecast: DamageForecast,
    #[serde(skip_serializing_if = "Option::is_none")]
    round: Option<RoundSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prediction: Option<OutcomeStats>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fe_combat_sim=info,battle_runner=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Config file (or defaults) with command-line overrides applied
fn resolve_config(args: &Args) -> Result<SimulatorConfig> {
    let mut config = match &args.config {
        Some(path) => SimulatorConfig::load(path)?,
        None => SimulatorConfig::default(),
    };

    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(rounds) = args.rounds {
        config.max_rounds = rounds;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(avoid) = args.terrain_avoid {
        config.terrain_avoid = avoid;
    }

    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<()> {
    let config = resolve_config(args)?;

    let weapons = match &config.weapons_path {
        Some(path) => WeaponCatalog::load(path)?,
        None => WeaponCatalog::builtin()?,
    };
    let classes = match &config.classes_path {
        Some(path) => ClassCatalog::load(path)?,
        None => ClassCatalog::builtin()?,
    };
    let templates = TemplateCatalog::from_classes(&classes);

    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    tracing::info!("Seed {}", seed);

    let mut attacker = templates.create_character(
        &args.attacker,
        &args.attacker_template,
        args.attacker_level,
        Some(args.attacker_weapon.as_str()),
        &weapons,
        &mut rng,
    )?;
    let mut defender = templates.create_character(
        &args.defender,
        &args.defender_template,
        args.defender_level,
        Some(args.defender_weapon.as_str()),
        &weapons,
        &mut rng,
    )?;

    let terrain = Terrain::with_avoid(config.terrain_avoid);
    let attacker_forecast = predict_damage(&attacker, &defender, &terrain);
    let defender_forecast = predict_damage(&defender, &attacker, &terrain);

    let mut report = RunReport {
        seed,
        attacker: CombatantReport::new(&attacker, args.attacker_level),
        defender: CombatantReport::new(&defender, args.defender_level),
        attacker_forecast,
        defender_forecast,
        round: None,
        prediction: None,
    };

    if args.single_round {
        let mut battle = Battle::with_terrain(&mut attacker, &mut defender, terrain);
        report.round = Some(battle.resolve_round(&mut rng));
    } else {
        let options = PredictionOptions::from(&config);
        report.prediction = Some(predict_battle_outcome(
            &mut attacker,
            &mut defender,
            &options,
            &mut rng,
        )?);
    }

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_text(&report),
    }

    Ok(())
}

fn print_text(report: &RunReport) {
    for (side, unit, forecast) in [
        ("Attacker", &report.attacker, &report.attacker_forecast),
        ("Defender", &report.defender, &report.defender_forecast),
    ] {
        println!(
            "{}: {} ({}) Lv {} with {}",
            side,
            unit.name,
            unit.class,
            unit.level,
            unit.weapon.as_deref().unwrap_or("nothing")
        );
        println!("  {}", unit.stats);
        println!(
            "  Dmg {} (crit {}) / Hit {}% / Crit {}%{}{}",
            forecast.damage,
            forecast.crit_damage,
            forecast.hit_rate,
            forecast.crit_rate,
            if forecast.effective { " / effective" } else { "" },
            if forecast.follow_up { " / x2" } else { "" }
        );
    }
    println!();

    if let Some(round) = &report.round {
        for attack in &round.attacks {
            println!("{}", attack);
        }
        match &round.victor_name {
            Some(name) => println!("{} is victorious!", name),
            None => println!("Both units are still standing."),
        }
    }

    if let Some(outcome) = &report.prediction {
        println!("Over {} battles (seed {}):", outcome.iterations, report.seed);
        println!(
            "  {} wins {:.1}%, {} wins {:.1}%, draws {:.1}%",
            report.attacker.name,
            outcome.attacker_victory_percentage,
            report.defender.name,
            outcome.defender_victory_percentage,
            outcome.draw_percentage
        );
        println!(
            "  Avg HP left {:.1} / {:.1}, avg rounds {:.2}, avg attacks {:.2}",
            outcome.average_attacker_remaining_hp,
            outcome.average_defender_remaining_hp,
            outcome.average_rounds,
            outcome.average_attacks
        );
        println!(
            "  Misses {:.1}%, crits {:.1}%",
            outcome.miss_percentage, outcome.crit_percentage
        );
    }
}
