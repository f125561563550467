//! Analyse command implementation.
//!
//! Discovers the input files, loads the filters, counts matching rows and
//! writes the results and error files.

use csvcount_core::analysis::{self, load_filters};
use csvcount_core::discovery::discover;
use csvcount_core::AnalysisOptions;
use tracing::info;

use super::{confirm, CommandContext, CommandError, ConfirmResult, Result};
use crate::output::{format_analysis_json, format_analysis_summary};

/// Executes the analyse command.
///
/// # Errors
///
/// Returns an error if no input files or no filters are found, if a file
/// cannot be read, or if the filter file holds a malformed cell. Rows that
/// cannot be evaluated are not errors; they end up in the error file.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let settings = ctx.settings()?;

    let pattern = settings.compiled_pattern()?;
    let inputs = discover(&settings.input_dir, &pattern)?;
    if inputs.is_empty() {
        return Err(CommandError::Input(format!(
            "no input files found in {}",
            settings.input_dir.display()
        )));
    }

    let filters = load_filters(&settings.filter_file)?;
    if filters.is_empty() {
        return Err(CommandError::Input(format!(
            "no filters defined in {}",
            settings.filter_file.display()
        )));
    }

    if settings.results_file.exists() || settings.error_file.exists() {
        let prompt = format!(
            "Overwrite {} and {}?",
            settings.results_file.display(),
            settings.error_file.display()
        );
        if confirm(ctx, &prompt)? == ConfirmResult::Aborted {
            if !ctx.quiet {
                eprintln!("Aborted.");
            }
            return Ok(());
        }
    }

    info!(
        files = inputs.len(),
        filters = filters.len(),
        case_sensitive = settings.case_sensitive,
        "starting analysis"
    );
    let options = AnalysisOptions {
        case_sensitive: settings.case_sensitive,
    };
    let report = analysis::run(&inputs, &filters, &options)?;
    report.write(&settings.results_file, &settings.error_file)?;

    if ctx.json_output {
        println!(
            "{}",
            format_analysis_json(&report, &settings.results_file, &settings.error_file)?
        );
    } else if !ctx.quiet {
        print!(
            "{}",
            format_analysis_summary(
                &report,
                &settings.results_file,
                &settings.error_file,
                ctx.use_colors
            )
        );
    }

    Ok(())
}
