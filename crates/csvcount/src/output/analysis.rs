//! Analysis summary formatting.

use std::path::Path;

use csvcount_core::AnalysisReport;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::plural;

/// JSON output structure for the analyse command.
#[derive(Serialize)]
pub struct AnalysisOutput<'a> {
    pub status: &'static str,
    pub files: usize,
    pub filters: usize,
    pub error_count: usize,
    pub results_file: String,
    pub error_file: String,
    #[serde(flatten)]
    pub report: &'a AnalysisReport,
}

/// Formats an analysis report as JSON.
pub fn format_analysis_json(
    report: &AnalysisReport,
    results_file: &Path,
    error_file: &Path,
) -> Result<String, serde_json::Error> {
    let output = AnalysisOutput {
        status: "complete",
        files: report.results.len(),
        filters: report.filter_count,
        error_count: report.errors.len(),
        results_file: results_file.display().to_string(),
        error_file: error_file.display().to_string(),
        report,
    };
    serde_json::to_string_pretty(&output)
}

/// Formats the summary printed after an analysis run.
pub fn format_analysis_summary(
    report: &AnalysisReport,
    results_file: &Path,
    error_file: &Path,
    use_colors: bool,
) -> String {
    let errors = report.errors.len();
    let status = format!("Analysis complete with {errors} errors");
    let status = match (use_colors, errors) {
        (false, _) => status,
        (true, 0) => status.green().to_string(),
        (true, _) => status.yellow().to_string(),
    };

    let mut output = format!(
        "Analysed {} against {}.\n{}\n",
        plural(report.results.len(), "file"),
        plural(report.filter_count, "filter"),
        status
    );
    output.push_str(&format!("Results: {}\n", results_file.display()));
    output.push_str(&format!("Errors: {}\n", error_file.display()));
    output
}
