//! Command implementations for the csvcount CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod analyse;
pub mod completions;
pub mod config;
pub mod files;
pub mod filters;

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use csvcount_core::codec::CodecError;
use csvcount_core::discovery::DiscoveryError;
use csvcount_core::AnalysisError;
use dialoguer::Confirm;

use crate::cli::Cli;
use self::config::{load_config, Settings};

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Filter loading or analysis error.
    #[error("{0}")]
    Analysis(#[from] AnalysisError),

    /// Input file discovery error.
    #[error("discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    /// CSV file error.
    #[error("file error: {0}")]
    Codec(#[from] CodecError),

    /// Nothing to analyse.
    #[error("{0}")]
    Input(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Path and matching settings given on the command line for one invocation.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input_dir: Option<PathBuf>,
    pub filter_file: Option<PathBuf>,
    pub results_file: Option<PathBuf>,
    pub error_file: Option<PathBuf>,
    pub ignore_case: bool,
}

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether confirmation prompts are answered with yes.
    pub assume_yes: bool,
    /// Command-line overrides applied on top of the config file.
    pub overrides: Overrides,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color,
            quiet: cli.quiet,
            assume_yes: cli.yes,
            overrides: Overrides {
                input_dir: cli.input_dir.clone(),
                filter_file: cli.filter_file.clone(),
                results_file: cli.results_file.clone(),
                error_file: cli.error_file.clone(),
                ignore_case: cli.ignore_case,
            },
        }
    }

    /// Loads the config file and applies the command-line overrides.
    pub fn settings(&self) -> Result<Settings> {
        let config = load_config()?;
        Ok(Settings::from_config(&config).with_overrides(&self.overrides))
    }
}

/// Outcome of a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResult {
    Confirmed,
    Aborted,
}

/// Asks the user to confirm an action.
///
/// `--yes` confirms without asking. Without a terminal there is nobody to
/// ask, so the action is refused with a configuration error.
pub fn confirm(ctx: &CommandContext, prompt: &str) -> Result<ConfirmResult> {
    if ctx.assume_yes {
        return Ok(ConfirmResult::Confirmed);
    }

    if !io::stdin().is_terminal() {
        return Err(CommandError::Config(format!(
            "{prompt} Use --yes to confirm when not running interactively."
        )));
    }

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CommandError::Io(io::Error::other(e.to_string())))?;

    Ok(if confirmed {
        ConfirmResult::Confirmed
    } else {
        ConfirmResult::Aborted
    })
}
