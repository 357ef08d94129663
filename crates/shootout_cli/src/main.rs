//! Shootout CLI
//!
//! Headless driver for the penalty shootout engine:
//! seeded matches, keeper calibration and settings inspection.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use shootout_core::engine::keeper::ShotResolver;
use shootout_core::engine::rng::RandomSource;
use shootout_core::engine::GoalFrame;
use shootout_core::save::{FileStore, SettingsManager};
use shootout_core::{
    Difficulty, EngineConfig, MatchSession, MatchSummary, SeededRandom, ShotRecord, ViewMode,
};

#[derive(Parser)]
#[command(name = "shootout")]
#[command(about = "Play and inspect penalty shootouts from the terminal", long_about = None)]
struct Cli {
    /// Engine config JSON (missing fields use defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one match, one aim angle per shot
    Play {
        /// RNG seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Keeper difficulty: easy, medium, hard
        #[arg(long, default_value = "medium", value_parser = parse_difficulty)]
        difficulty: Difficulty,

        /// Aim angles in degrees, cycled when the match runs longer
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_value = "0")]
        angles: Vec<f32>,

        /// Print the final summary as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Measure the keeper's block rate per difficulty
    Calibrate {
        /// Resolver calls per difficulty
        #[arg(long, default_value_t = 10_000)]
        samples: u32,

        /// RNG seed
        #[arg(long, default_value_t = 7)]
        seed: u64,
    },

    /// Show (and optionally change) persisted settings
    Settings {
        /// Settings directory
        #[arg(long)]
        dir: PathBuf,

        #[arg(long, value_parser = parse_difficulty)]
        difficulty: Option<Difficulty>,

        /// on / off
        #[arg(long, value_parser = parse_switch)]
        sound: Option<bool>,

        /// on / off
        #[arg(long, value_parser = parse_switch)]
        vibration: Option<bool>,

        /// day, night, rain
        #[arg(long, value_parser = parse_view)]
        view: Option<ViewMode>,
    },
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::parse(s).ok_or_else(|| format!("unknown difficulty `{s}` (easy, medium, hard)"))
}

fn parse_switch(s: &str) -> Result<bool, String> {
    match s {
        "on" | "true" => Ok(true),
        "off" | "false" => Ok(false),
        _ => Err(format!("expected on/off, got `{s}`")),
    }
}

fn parse_view(s: &str) -> Result<ViewMode, String> {
    ViewMode::parse(s).ok_or_else(|| format!("unknown view `{s}` (day, night, rain)"))
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    EngineConfig::from_json(&raw)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Play { seed, difficulty, angles, json } => {
            let summary = play_match(config, difficulty, seed, &angles)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", summary.message);
                println!(
                    "   Goals: {}  Saves: {}  Misses: {}  Shots: {}",
                    summary.score.goals,
                    summary.score.saves,
                    summary.score.misses,
                    summary.total_shots
                );
            }
        }

        Commands::Calibrate { samples, seed } => {
            if samples == 0 {
                bail!("--samples must be positive");
            }
            config.validate()?;
            let report = calibrate(&config, samples, seed);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Settings { dir, difficulty, sound, vibration, view } => {
            let mut manager = SettingsManager::new(FileStore::new(&dir));
            let changed =
                difficulty.is_some() || sound.is_some() || vibration.is_some() || view.is_some();

            let settings = if changed {
                manager
                    .update(|s| {
                        if let Some(d) = difficulty {
                            s.difficulty = d;
                        }
                        if let Some(on) = sound {
                            s.sound_enabled = on;
                        }
                        if let Some(on) = vibration {
                            s.vibration_enabled = on;
                        }
                        if let Some(v) = view {
                            s.view_mode = v;
                        }
                    })
                    .with_context(|| format!("Failed to write settings in {}", dir.display()))?
            } else {
                manager.load()
            };

            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}

fn play_match(
    config: EngineConfig,
    difficulty: Difficulty,
    seed: u64,
    angles: &[f32],
) -> Result<MatchSummary> {
    if angles.is_empty() {
        bail!("at least one aim angle is required");
    }

    let mut session = MatchSession::new(config, difficulty)?;
    let mut rng = SeededRandom::new(seed);

    for angle in angles.iter().cycle() {
        let Some(record) = session.kick(*angle, &mut rng) else {
            break;
        };
        print_shot(&record);
    }

    Ok(session.summary())
}

fn print_shot(record: &ShotRecord) {
    println!(
        "Shot {:>2}  aim {:>6.1}°  {}",
        record.attempt.attempt_index,
        record.attempt.aim_angle,
        record.result.message()
    );
}

#[derive(Serialize)]
struct CalibrationRow {
    difficulty: Difficulty,
    configured: f32,
    observed: f32,
}

fn calibrate(config: &EngineConfig, samples: u32, seed: u64) -> Vec<CalibrationRow> {
    let resolver = ShotResolver::new(GoalFrame::from_config(config), config.aim_limit_deg);
    let mut rng = SeededRandom::new(seed);

    Difficulty::ALL
        .into_iter()
        .map(|difficulty| {
            let blocks = (0..samples)
                .filter(|_| {
                    let angle = (rng.next_unit() * 2.0 - 1.0) * config.aim_limit_deg;
                    resolver.resolve(angle, difficulty, &mut rng).will_block
                })
                .count();
            CalibrationRow {
                difficulty,
                configured: difficulty.save_probability(),
                observed: blocks as f32 / samples as f32,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_play() {
        let cli = Cli::try_parse_from([
            "shootout", "play", "--seed", "3", "--difficulty", "hard", "--angles", "-30,0,45",
        ])
        .unwrap();
        match cli.command {
            Commands::Play { seed, difficulty, angles, json } => {
                assert_eq!(seed, 3);
                assert_eq!(difficulty, Difficulty::Hard);
                assert_eq!(angles, vec![-30.0, 0.0, 45.0]);
                assert!(!json);
            }
            _ => panic!("expected play"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_difficulty() {
        assert!(Cli::try_parse_from(["shootout", "play", "--difficulty", "insane"]).is_err());
    }

    #[test]
    fn test_play_match_terminates() {
        let summary = play_match(EngineConfig::compact(), Difficulty::Medium, 9, &[-45.0, 20.0])
            .unwrap();
        assert!(summary.outcome.is_some_and(|o| o.is_terminal()));
        assert_eq!(summary.history.len() as u32, summary.total_shots);
    }

    #[test]
    fn test_calibration_close_to_configured() {
        for row in calibrate(&EngineConfig::default(), 10_000, 1) {
            assert!((row.observed - row.configured).abs() < 0.03);
        }
    }
}
