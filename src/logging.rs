//! Log setup for the binaries.
//!
//! Filtering follows `RUST_LOG` (default `info`). The terminal driver owns the
//! screen, so its logs only go to a file and are dropped when no path is set.
//! The headless driver logs to stderr because stdout carries the protocol.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, Mode};
use crate::engine::Landing;

/// Install the global subscriber. Call once, before the first log line.
pub fn init(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match (&config.log_path, config.mode) {
        (Some(path), _) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow!("install log subscriber: {}", e))?;
        }
        (None, Mode::Headless) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow!("install log subscriber: {}", e))?;
        }
        (None, Mode::Interactive) => {}
    }
    Ok(())
}

/// One line per landing; plain drops stay at debug.
pub fn record_landing(landing: Landing, score: u32) {
    if landing.topped_out {
        info!(score, "topped out");
    } else if landing.lines_cleared > 0 {
        info!(lines = landing.lines_cleared, points = landing.points, score, "lines cleared");
    } else {
        debug!(score, "piece placed");
    }
}
