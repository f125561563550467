//! Filter group listing.

use csvcount_core::filter::FilterSet;
use serde::Serialize;

use super::helpers::{format_dimmed, format_heading};

/// JSON output structure for the filters command.
#[derive(Serialize)]
pub struct FiltersOutput<'a> {
    pub path: String,
    pub count: usize,
    #[serde(flatten)]
    pub filters: &'a FilterSet,
}

/// Formats filter groups as JSON.
pub fn format_filters_json(path: &str, filters: &FilterSet) -> Result<String, serde_json::Error> {
    let output = FiltersOutput {
        path: path.to_string(),
        count: filters.len(),
        filters,
    };
    serde_json::to_string_pretty(&output)
}

/// Formats filter groups as text.
///
/// Each group is headed `Filter N:` and lists one condition per line. A group
/// without conditions matches every row.
pub fn format_filters_table(filters: &FilterSet, use_colors: bool) -> String {
    if filters.is_empty() {
        return "No filters found.\n".to_string();
    }

    let mut output = String::new();
    for (index, group) in filters.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }
        let heading = format!("Filter {}:", index + 1);
        output.push_str(&format_heading(&heading, use_colors));
        output.push('\n');

        if group.is_empty() {
            output.push_str(&format!("  {}\n", format_dimmed("(matches every row)", use_colors)));
        }
        for condition in &group.conditions {
            output.push_str(&format!("  {condition}\n"));
        }
    }
    output
}
