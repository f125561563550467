//! Input file listing.

use std::path::Path;

use csvcount_core::InputTable;
use serde::Serialize;

use super::helpers::format_dimmed;

/// JSON output structure for the files command.
#[derive(Serialize)]
pub struct FilesOutput<'a> {
    pub directory: String,
    pub files: &'a [InputTable],
}

/// Formats discovered input files as JSON.
pub fn format_files_json(dir: &Path, inputs: &[InputTable]) -> Result<String, serde_json::Error> {
    let output = FilesOutput {
        directory: dir.display().to_string(),
        files: inputs,
    };
    serde_json::to_string_pretty(&output)
}

/// Formats discovered input files, one `NNN<TAB>name` line each.
///
/// `hint` names the file name fragment input files must carry and is shown
/// when no files were found.
pub fn format_files_table(
    dir: &Path,
    inputs: &[InputTable],
    hint: &str,
    use_colors: bool,
) -> String {
    if inputs.is_empty() {
        let message = format!(
            "No input files found in {}. File names must contain a number like \"{}\".",
            dir.display(),
            hint
        );
        return format!("{}\n", format_dimmed(&message, use_colors));
    }

    let mut output = String::new();
    for input in inputs {
        output.push_str(&format!("{}\t{}\n", input.id_str(), input.label));
    }
    output
}
