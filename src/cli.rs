//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Exactly one of --dir (allocate only) or --install (allocate + rename) is required
//!   unless --print-config/--init-config is given.
//! - --debug is a shorthand for --log-level debug.

use clap::{ArgGroup, Parser, ValueHint};
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::types::{Config, LogLevel};

/// Create a uniquely named temp symlink, optionally installing it over a path.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Create collision-free temp symlinks and install them atomically"
)]
#[command(group(
    ArgGroup::new("mode")
        .args(["dir", "install"])
        .multiple(false)
))]
pub struct Args {
    /// Content of the new symlink. Written verbatim; it does not have to exist.
    #[arg(value_name = "TARGET", required_unless_present_any = ["print_config", "init_config"])]
    pub target: Option<String>,

    /// Directory to create the temp symlink in; its path is printed.
    #[arg(
        long,
        short = 'D',
        value_name = "DIR",
        value_hint = ValueHint::DirPath,
        required_unless_present_any = ["install", "print_config", "init_config"],
        help = "Create a temp symlink in DIR and print its path"
    )]
    pub dir: Option<PathBuf>,

    /// Path to atomically replace with a symlink to TARGET.
    #[arg(
        long,
        short = 'i',
        value_name = "PATH",
        value_hint = ValueHint::AnyPath,
        help = "Atomically point PATH at TARGET (temp symlink + rename)"
    )]
    pub install: Option<PathBuf>,

    /// Override the number of candidate names tried per allocation.
    #[arg(long, value_name = "N", help = "Candidate temp names to try before giving up")]
    pub max_attempts: Option<u32>,

    /// Override the collision count after which the suffix generator is reseeded.
    #[arg(long, value_name = "N", help = "Collisions tolerated before reseeding")]
    pub reseed_after: Option<u32>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(
        long,
        value_name = "LEVEL",
        value_parser = LogLevel::from_str,
        help = "Set log level: quiet, normal, info, debug"
    )]
    pub log_level: Option<LogLevel>,

    /// Override the log file path.
    #[arg(long, value_hint = ValueHint::FilePath, help = "Also write logs to this file")]
    pub log_file: Option<PathBuf>,

    /// Print where fdb_symlink will look for the config file, then exit.
    #[arg(long, help = "Print the config file location used by fdb_symlink and exit")]
    pub print_config: bool,

    /// Write a template config file at the config location, then exit.
    #[arg(long, help = "Create a template config file and exit")]
    pub init_config: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.clone()
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if let Some(n) = self.max_attempts {
            cfg.max_attempts = n;
        }
        if let Some(n) = self.reseed_after {
            cfg.reseed_after = n;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
