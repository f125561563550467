//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Log events go to stderr so they never mix with command output.
//!
//! # Log Levels
//!
//! - `error`: Fatal errors
//! - `warn`: Rows that could not be evaluated (default)
//! - `info`: Run summaries
//! - `debug`: Per-file and per-row detail
//!
//! `RUST_LOG` takes precedence over `--verbose` and `--quiet`.

use std::io;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration for logging behavior.
#[derive(Debug, Clone, Copy)]
pub struct LogConfig {
    /// Level used when `RUST_LOG` is not set.
    pub level: Level,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
}

impl LogConfig {
    /// Picks the level from the `--verbose` and `--quiet` flags.
    pub fn from_flags(verbose: bool, quiet: bool, use_colors: bool) -> Self {
        let level = if verbose {
            Level::DEBUG
        } else if quiet {
            Level::ERROR
        } else {
            Level::WARN
        };
        Self {
            level,
            with_ansi: use_colors,
        }
    }
}

/// Installs the global subscriber.
///
/// A second call leaves the first subscriber in place.
pub fn init_logging(config: &LogConfig) {
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(false)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init();
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

/// Our crates log at `level`; dependencies stay at warn.
fn default_directives(level: Level) -> String {
    let level = level.as_str().to_lowercase();
    format!("warn,csvcount={level},csvcount_core={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_flags() {
        assert_eq!(LogConfig::from_flags(false, false, true).level, Level::WARN);
        assert_eq!(LogConfig::from_flags(true, false, true).level, Level::DEBUG);
        assert_eq!(LogConfig::from_flags(false, true, true).level, Level::ERROR);
    }

    #[test]
    fn test_default_directives() {
        assert_eq!(
            default_directives(Level::DEBUG),
            "warn,csvcount=debug,csvcount_core=debug"
        );
    }
}
