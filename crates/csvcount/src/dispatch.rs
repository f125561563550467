//! Command dispatch module for routing CLI commands to their handlers.

use crate::cli::{Cli, Commands, ConfigCommands, FiltersCommands, Shell};
use crate::commands::{self, CommandContext, CommandError, Result};

/// Trait for commands that can be executed.
pub trait RunCommand {
    /// Execute the command.
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// A parsed command ready to run.
pub enum Dispatch<'a> {
    Files,
    Filters(&'a Option<FiltersCommands>),
    Analyse,
    Config(&'a Option<ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> Dispatch<'a> {
    /// Creates a dispatch from the CLI command.
    pub fn from_cli(cli: &'a Cli) -> Self {
        match &cli.command {
            Some(Commands::Files) => Self::Files,
            Some(Commands::Filters { command }) => Self::Filters(command),
            Some(Commands::Analyse) => Self::Analyse,
            Some(Commands::Config { command }) => Self::Config(command),
            Some(Commands::Completions { shell }) => Self::Completions(shell),
            None => Self::Help,
        }
    }
}

impl RunCommand for Dispatch<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Files => commands::files::execute(ctx),
            Self::Filters(command) => dispatch_filters(ctx, command),
            Self::Analyse => commands::analyse::execute(ctx),
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("csvcount - count CSV rows matching filters");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

fn dispatch_filters(ctx: &CommandContext, command: &Option<FiltersCommands>) -> Result<()> {
    match command {
        Some(FiltersCommands::List) | None => commands::filters::execute_list(ctx),
        Some(FiltersCommands::Sample) => commands::filters::execute_sample(ctx),
    }
}

fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Reset) => commands::config::execute_reset(ctx),
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}
