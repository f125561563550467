use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod dispatch;
mod logging;
mod output;

use cli::Cli;
use commands::{CommandContext, CommandError};
use csvcount_core::AnalysisError;
use dispatch::{Dispatch, RunCommand};
use logging::{init_logging, LogConfig};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_flags(cli.verbose, cli.quiet, !cli.no_color));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                match serde_json::to_string_pretty(&error_json) {
                    Ok(text) => eprintln!("{text}"),
                    Err(_) => eprintln!("Error: {e}"),
                }
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(error_exit_code(&e))
        }
    }
}

fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);
    Dispatch::from_cli(cli).execute(&ctx)
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Analysis(AnalysisError::Spec(_)) => "FILTER_ERROR",
        CommandError::Analysis(AnalysisError::Source(_)) | CommandError::Codec(_) => "FILE_ERROR",
        CommandError::Discovery(_) => "DISCOVERY_ERROR",
        CommandError::Input(_) => "INPUT_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the process exit code for an error.
fn error_exit_code(e: &CommandError) -> u8 {
    match e {
        CommandError::Analysis(AnalysisError::Spec(_)) => 1,
        CommandError::Json(_) => 1,
        CommandError::Analysis(AnalysisError::Source(_)) | CommandError::Codec(_) => 3,
        CommandError::Io(_) => 3,
        CommandError::Discovery(_) | CommandError::Input(_) => 4,
        CommandError::Config(_) => 5,
    }
}
