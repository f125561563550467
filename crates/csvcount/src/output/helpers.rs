//! Common helper functions for output formatting.

use owo_colors::OwoColorize;

/// Formats a section heading.
pub fn format_heading(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.green().bold().to_string()
    } else {
        text.to_string()
    }
}

/// Formats secondary text such as hints and column headers.
pub fn format_dimmed(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

/// Formats `count` followed by `word`, pluralised unless `count` is one.
pub fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}
