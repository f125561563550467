//! Files command implementation.
//!
//! Lists the input files found in the input directory.

use csvcount_core::discovery::{discover, DEFAULT_PATTERN, DEFAULT_PATTERN_HINT};

use super::{CommandContext, Result};
use crate::output::{format_files_json, format_files_table};

/// Executes the files command.
///
/// # Errors
///
/// Returns an error if the input directory cannot be read or two files share
/// a number.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let settings = ctx.settings()?;
    let pattern = settings.compiled_pattern()?;
    let inputs = discover(&settings.input_dir, &pattern)?;

    if ctx.json_output {
        println!("{}", format_files_json(&settings.input_dir, &inputs)?);
    } else if !ctx.quiet {
        let hint = if settings.pattern == DEFAULT_PATTERN {
            DEFAULT_PATTERN_HINT
        } else {
            settings.pattern.as_str()
        };
        print!(
            "{}",
            format_files_table(&settings.input_dir, &inputs, hint, ctx.use_colors)
        );
    }

    Ok(())
}
