//! Runtime configuration for the binaries.
//!
//! Values come from environment variables first and command-line arguments
//! second, so a flag always wins over the environment:
//!
//! - `TETRIS_SEED` / `--seed <u32>`: piece bag seed (random when unset)
//! - `TETRIS_DROP_MS` / `--drop-ms <ms>`: gravity interval (default: 1000)
//! - `TETRIS_LOG_PATH` / `--log <path>`: log file
//! - the `headless` subcommand switches to the stdio JSON driver

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use crate::types::DEFAULT_DROP_MS;

/// Classic Tetris in the terminal, or headless over stdin/stdout
#[derive(Parser, Debug)]
#[command(name = "classic-tetris", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Piece bag seed
    #[arg(long, global = true)]
    seed: Option<u32>,

    /// Gravity interval in milliseconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    drop_ms: Option<u64>,

    /// Append logs to this file
    #[arg(long = "log", global = true)]
    log_path: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Serve line-delimited JSON on stdin/stdout
    Headless,
}

/// Which driver to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Terminal game
    Interactive,
    /// Line-delimited JSON over stdin/stdout
    Headless,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub mode: Mode,
    pub seed: Option<u32>,
    pub drop_ms: u64,
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Interactive,
            seed: None,
            drop_ms: DEFAULT_DROP_MS,
            log_path: None,
        }
    }
}

impl AppConfig {
    /// Resolve from the process environment and arguments. Bad arguments
    /// print usage and exit, as clap does.
    pub fn from_process() -> Result<Self> {
        Self::from_cli(|key| std::env::var(key).ok(), Cli::parse())
    }

    /// Resolve from an environment lookup and an argument list (without the
    /// program name).
    pub fn resolve(env: impl Fn(&str) -> Option<String>, args: &[String]) -> Result<Self> {
        let argv = std::iter::once("classic-tetris").chain(args.iter().map(String::as_str));
        let cli = Cli::try_parse_from(argv)?;
        Self::from_cli(env, cli)
    }

    fn from_cli(env: impl Fn(&str) -> Option<String>, cli: Cli) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = non_empty(env("TETRIS_SEED")) {
            config.seed = Some(parse_seed(&v)?);
        }
        if let Some(v) = non_empty(env("TETRIS_DROP_MS")) {
            config.drop_ms = parse_drop_ms(&v)?;
        }
        if let Some(v) = non_empty(env("TETRIS_LOG_PATH")) {
            config.log_path = Some(PathBuf::from(v));
        }

        if cli.command == Some(Command::Headless) {
            config.mode = Mode::Headless;
        }
        if let Some(seed) = cli.seed {
            config.seed = Some(seed);
        }
        if let Some(ms) = cli.drop_ms {
            config.drop_ms = ms;
        }
        if let Some(path) = cli.log_path {
            config.log_path = Some(path);
        }

        Ok(config)
    }

    /// The configured seed, or a random one.
    pub fn seed_or_random(&self) -> u32 {
        self.seed.unwrap_or_else(rand::random)
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn parse_seed(v: &str) -> Result<u32> {
    v.parse::<u32>()
        .map_err(|_| anyhow!("invalid TETRIS_SEED value: {}", v))
}

fn parse_drop_ms(v: &str) -> Result<u64> {
    match v.parse::<u64>() {
        Ok(0) => Err(anyhow!("TETRIS_DROP_MS must be greater than zero")),
        Ok(ms) => Ok(ms),
        Err(_) => Err(anyhow!("invalid TETRIS_DROP_MS value: {}", v)),
    }
}
