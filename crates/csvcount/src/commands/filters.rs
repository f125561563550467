//! Filters command implementation.
//!
//! Lists the filter groups of the filter file and writes the sample filter
//! file.

use csvcount_core::analysis::load_filters;
use csvcount_core::sample::write_sample_filters;

use super::{confirm, CommandContext, ConfirmResult, Result};
use crate::output::{format_filters_json, format_filters_table};

/// Executes the filters list command.
///
/// # Errors
///
/// Returns an error if the filter file is missing or holds a malformed cell.
pub fn execute_list(ctx: &CommandContext) -> Result<()> {
    let settings = ctx.settings()?;
    let filters = load_filters(&settings.filter_file)?;

    if ctx.json_output {
        let path = settings.filter_file.display().to_string();
        println!("{}", format_filters_json(&path, &filters)?);
    } else if !ctx.quiet {
        print!("{}", format_filters_table(&filters, ctx.use_colors));
    }

    Ok(())
}

/// Executes the filters sample command.
///
/// An existing sample file is only replaced after confirmation.
pub fn execute_sample(ctx: &CommandContext) -> Result<()> {
    let settings = ctx.settings()?;
    let path = &settings.sample_filter_file;

    if path.exists() {
        let prompt = format!("{} already exists. Overwrite it?", path.display());
        if confirm(ctx, &prompt)? == ConfirmResult::Aborted {
            if !ctx.quiet {
                eprintln!("Aborted.");
            }
            return Ok(());
        }
    }

    write_sample_filters(path)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Sample filters written to {}", path.display());
    }

    Ok(())
}
