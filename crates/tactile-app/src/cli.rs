//! CLI argument definitions for the Tactile application.
//!
//! Uses `clap` with derive macros. Priority resolution for settings:
//! CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tactile, a braille learning and voice navigation toolkit.
#[derive(Parser, Debug)]
#[command(name = "tactile", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the braille cells for a piece of text.
    Encode {
        /// Text to transliterate.
        text: String,
    },
    /// Run an interactive practice lesson over stdin.
    Practice {
        /// Text to practice; defaults to the configured lesson word.
        word: Option<String>,
    },
    /// Feed stdin lines to the voice navigator as final transcripts.
    Listen,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > TACTILE_CONFIG env var > ~/.tactile/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("TACTILE_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".tactile").join("config.toml");
    }
    PathBuf::from("tactile.toml")
}
