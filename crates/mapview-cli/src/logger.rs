//! Logging setup.
//!
//! The libraries only emit `tracing` events; the binary installs the
//! subscriber. Level selection, first match wins:
//!
//! 1. `--verbose`: debug for the mapview crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`
//! 4. info for the mapview crates

use std::fmt;
use std::str::FromStr;

use tracing_subscriber::{EnvFilter, fmt as tracing_fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Targets the level applies to.
const TARGETS: [&str; 3] = ["mapview", "mapview_codec", "mapview_cli"];

/// Log level for mapview output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// No logging output
    Silent,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Silent => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// Filter directives applying this level to the mapview crates.
    pub fn directives(&self) -> String {
        TARGETS
            .iter()
            .map(|target| format!("{target}={}", self.as_filter()))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::new(self.directives())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "off" => Ok(LogLevel::Silent),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(format!("Invalid log level: {}", other)),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter())
    }
}

/// Level selected by the global flags, `None` when `RUST_LOG` decides.
pub fn level_for_flags(verbose: bool, quiet: bool) -> Option<LogLevel> {
    if verbose {
        Some(LogLevel::Debug)
    } else if quiet {
        Some(LogLevel::Error)
    } else {
        None
    }
}

/// Install the global subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = match level_for_flags(verbose, quiet) {
        Some(level) => level.env_filter(),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| LogLevel::Info.env_filter()),
    };

    init_logger_with_filter(filter, no_color);
}

/// Install the global subscriber with a custom filter.
///
/// Does nothing when a subscriber is already installed.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = tracing_fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
