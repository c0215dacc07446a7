//! greed - the Greed grid game for the terminal
//!
//! The player (`@`) sits on a grid of digits 1-9 and jumps in one of eight
//! directions. A jump eats as many cells as the digit next to the player,
//! and is only possible when that whole line of cells is still intact. The
//! game ends when no jump is possible; the score is the number of cells
//! eaten.
//!
//! # Quick Start
//!
//! ```text
//! greed                  # 22x79 board
//! greed -H 10 -W 30      # Smaller board
//! greed -s 42            # Reproducible board
//! ```
//!
//! # Keys
//!
//! | Key | Direction |
//! |-----|-----------|
//! | q w e | up-left, up, up-right |
//! | a d | left, right |
//! | z x c | down-left, down, down-right |
//! | Space | Quit |

mod app;
mod config;
mod core;
mod ui;

use std::env;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::app::{run_game, EndReason};
use crate::config::Config;
use crate::core::Game;
use crate::ui::{KeyMapper, Renderer, TerminalInput};

/// Command line overrides
#[derive(Debug, Default, PartialEq)]
struct Args {
    height: Option<usize>,
    width: Option<usize>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
}

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    eprintln!("greed {}", VERSION);
}

fn print_help() {
    eprintln!("greed {} - The Greed grid game", VERSION);
    eprintln!();
    eprintln!("Usage: greed [OPTIONS]");
    eprintln!();
    eprintln!("Board options:");
    eprintln!("  -H, --height <N>      Grid rows (default: 22)");
    eprintln!("  -W, --width <N>       Grid columns (default: 79)");
    eprintln!("  -s, --seed <N>        Seed for a reproducible board");
    eprintln!();
    eprintln!("Other options:");
    eprintln!("  -c, --config <PATH>   Configuration file");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Keys (default):");
    eprintln!("  q w e                 Up-left, up, up-right");
    eprintln!("  a   d                 Left, right");
    eprintln!("  z x c                 Down-left, down, down-right");
    eprintln!("  Space                 Quit");
    eprintln!();
    eprintln!("Configuration: ~/.greed/config.toml");
    eprintln!("Log file:      ~/.greed/greed.log (level from GREED_LOG)");
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("Missing value for {}", flag))?;
    value
        .parse()
        .map_err(|_| format!("Invalid value for {}: {}", flag, value))
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-H" | "--height" => {
                i += 1;
                parsed.height = Some(parse_number(&args[i - 1], args.get(i))?);
            }
            "-W" | "--width" => {
                i += 1;
                parsed.width = Some(parse_number(&args[i - 1], args.get(i))?);
            }
            "-s" | "--seed" => {
                i += 1;
                parsed.seed = Some(parse_number(&args[i - 1], args.get(i))?);
            }
            "-c" | "--config" => {
                i += 1;
                let path = args.get(i).ok_or("Missing config path")?;
                parsed.config_path = Some(PathBuf::from(path));
            }
            arg => {
                return Err(format!("Unknown argument: {}. Use -h for help.", arg));
            }
        }
        i += 1;
    }

    Ok(parsed)
}

/// Log to a file; stdout belongs to the game
fn init_logging() {
    let log_path = Config::data_dir()
        .map(|dir| dir.join("greed.log"))
        .unwrap_or_else(|| PathBuf::from("greed.log"));

    // Create log directory if needed
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_env("GREED_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    let argv: Vec<String> = env::args().collect();
    let args = match parse_args(&argv) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    init_logging();
    info!("greed {} starting...", VERSION);

    let mut config = Config::load(args.config_path.as_deref());
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&config) {
        error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}

fn run(config: &Config) -> anyhow::Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut game = Game::new(config.height, config.width, &mut rng)?;
    let keys = KeyMapper::from_config(&config.keys)?;
    info!(
        "Board {}x{} (seed: {:?}), player at ({}, {})",
        config.height,
        config.width,
        config.seed,
        game.position().row,
        game.position().col
    );

    let mut renderer = Renderer::stdout(config.palette()?);
    renderer.init()?;
    let outcome = run_game(&mut game, &mut renderer, &mut TerminalInput, &keys)?;
    renderer.finish()?;

    match outcome.reason {
        EndReason::GameOver => info!("Final score {} ({:.2}%)", outcome.score, outcome.percentage),
        EndReason::Quit => info!("Quit at {} ({:.2}%)", outcome.score, outcome.percentage),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("greed")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args_defaults() {
        assert_eq!(parse_args(&argv(&[])), Ok(Args::default()));
    }

    #[test]
    fn test_parse_args_overrides() {
        let args = parse_args(&argv(&["-H", "10", "--width", "30", "-s", "42", "-c", "greed.toml"])).unwrap();
        assert_eq!(
            args,
            Args {
                height: Some(10),
                width: Some(30),
                seed: Some(42),
                config_path: Some(PathBuf::from("greed.toml")),
            }
        );
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&argv(&["--height"])).is_err());
        assert!(parse_args(&argv(&["--width", "wide"])).is_err());
        assert!(parse_args(&argv(&["--bogus"])).is_err());
    }
}
