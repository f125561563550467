//! Input tables and their sources.

use std::path::PathBuf;

use serde::Serialize;

use crate::codec::Grid;

/// A data table: a header row naming the fields, then the data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Field names, in column order.
    pub header: Vec<String>,
    /// Data rows. A row may hold fewer or more cells than the header.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Splits a grid into its header (first row) and data rows.
    ///
    /// An empty grid gives a table with no header and no rows.
    pub fn from_grid(grid: Grid) -> Self {
        let mut rows = grid.into_iter();
        let header = rows.next().unwrap_or_default();
        Self {
            header,
            rows: rows.collect(),
        }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A data file to analyse, identified by its source number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputTable {
    /// Source number, rendered zero-padded in results.
    pub id: u32,
    /// Display label, normally the file name.
    pub label: String,
    /// Location of the file.
    pub path: PathBuf,
}

impl InputTable {
    /// Creates an input labelled with the file name of `path`.
    pub fn new(id: u32, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { id, label, path }
    }

    /// The source number as a zero-padded three digit string.
    pub fn id_str(&self) -> String {
        format_id(self.id)
    }
}

/// Formats a source number as a zero-padded three digit string.
pub fn format_id(id: u32) -> String {
    format!("{id:03}")
}
