//! Output formatting utilities for the csvcount CLI.
//!
//! This module provides functions for formatting data as text or JSON.
//! It is organized into submodules by entity type:
//!
//! - [`files`] - Input file listing
//! - [`filters`] - Filter group listing
//! - [`analysis`] - Analysis summary
//! - [`helpers`] - Common formatting utilities

mod analysis;
mod files;
mod filters;
pub mod helpers;

pub use analysis::{format_analysis_json, format_analysis_summary};
pub use files::{format_files_json, format_files_table};
pub use filters::{format_filters_json, format_filters_table};
