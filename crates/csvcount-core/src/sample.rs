//! Built-in example filter specification.

use std::path::Path;

use crate::codec::{self, CodecResult, Grid};

/// Example filter specification with two filter groups.
pub const SAMPLE_FILTERS: &[&[&str]] = &[
    &["Count", ">= 10", ">=100"],
    &["Coverage", ">=10", ">=100"],
    &["Forward read count", ">=5", ">=50"],
    &["Reverse read count", ">=5", ">=50"],
    &["dbSNP", "BLANK", "BLANK"],
    &["Type", "Deletion,Insertion,MNV,Replacement", "Deletion,MNV"],
    &["Frequency", ">=2.5", "IGNORE"],
    &["Non-synonymous", "Yes,No,-", "Yes,-"],
    &["COSMIC", "BLANK", "IGNORE"],
];

/// Returns the sample specification as a grid.
pub fn sample_grid() -> Grid {
    SAMPLE_FILTERS
        .iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

/// Writes the sample specification to `path`, replacing any existing file.
pub fn write_sample_filters(path: &Path) -> CodecResult<()> {
    codec::write_grid(path, SAMPLE_FILTERS.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Condition, FilterSetBuilder};
    use tempfile::TempDir;

    #[test]
    fn test_sample_parses() {
        let filters = FilterSetBuilder::build(&sample_grid()).unwrap();
        assert_eq!(filters.len(), 2);
        assert_eq!(filters.groups[0].conditions.len(), 9);
        // Frequency and COSMIC are ignored in the second group.
        assert_eq!(filters.groups[1].conditions.len(), 7);
        assert_eq!(
            filters.groups[1].conditions[6],
            Condition::one_of("Non-synonymous", ["Yes", "-"])
        );
    }

    #[test]
    fn test_sample_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("filters_SAMPLE.csv");

        write_sample_filters(&path).unwrap();
        let grid = codec::read_grid(&path).unwrap();

        assert_eq!(grid, sample_grid());
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Type,\"Deletion,Insertion,MNV,Replacement\",\"Deletion,MNV\""));
    }
}
