//! Command-line interface parsing for Harbor Weather CLI
//!
//! The station is fixed; the only flags control where and how much the
//! dashboard logs.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::ui::Palette;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The log level is not a valid filter directive
    #[error("Invalid log level: '{0}'. Try one of: error, warn, info, debug, trace")]
    InvalidLogLevel(String),
}

/// Harbor Weather CLI - live weather dashboard for Gig Harbor, WA
#[derive(Parser, Debug)]
#[command(name = "harborwx")]
#[command(about = "Live terminal weather dashboard for Gig Harbor, WA (press q to quit)")]
#[command(version)]
pub struct Cli {
    /// Log filter, e.g. "info" or "harborwx=debug" (RUST_LOG takes precedence)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Write the log here instead of the default cache location
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Runtime settings derived from CLI arguments and environment
#[derive(Debug, Clone)]
pub struct Settings {
    /// Default log filter directive
    pub log_level: String,
    /// Explicit log file location, if any
    pub log_file: Option<PathBuf>,
    /// Panel styles
    pub palette: Palette,
}

impl Settings {
    /// Validates parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    /// * `no_color` - Whether `NO_COLOR` is set in the environment
    ///
    /// # Returns
    /// * `Ok(Settings)` with appropriate settings
    /// * `Err(CliError)` if the log level is malformed
    pub fn from_cli(cli: &Cli, no_color: bool) -> Result<Self, CliError> {
        let log_level = cli.log_level.trim().to_string();
        if log_level.is_empty() || tracing_subscriber::EnvFilter::try_new(&log_level).is_err() {
            return Err(CliError::InvalidLogLevel(cli.log_level.clone()));
        }

        let palette = if no_color {
            Palette::monochrome()
        } else {
            Palette::color()
        };

        Ok(Settings {
            log_level,
            log_file: cli.log_file.clone(),
            palette,
        })
    }
}

/// `NO_COLOR` counts when set to any non-empty value
pub fn no_color_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}
