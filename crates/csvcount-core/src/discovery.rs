//! Discovery of numbered input files.
//!
//! Input files carry their source number in the file name. The default
//! pattern expects names like `sample_042_g1_variants.csv`; the first capture
//! group of the pattern is the number.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::table::InputTable;

/// Default file name pattern; capture group 1 holds the source number.
pub const DEFAULT_PATTERN: &str = r"^.*_([0-9]{3})_g1_.*\.csv$";

/// Example of a file name fragment the default pattern looks for.
pub const DEFAULT_PATTERN_HINT: &str = "_123_g1_";

/// A specialized Result type for discovery.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// Errors raised while scanning for input files.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The input directory does not exist.
    #[error("input directory not found: {}", path.display())]
    DirectoryNotFound {
        /// Directory that was scanned.
        path: PathBuf,
    },

    /// The input directory could not be listed.
    #[error("failed to read directory {}: {source}", path.display())]
    DirectoryRead {
        /// Directory that was scanned.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two files carry the same source number.
    #[error("duplicate number \"{number}\" found in \"{first}\" and \"{second}\"")]
    DuplicateNumber {
        /// The shared number.
        number: String,
        /// File seen first.
        first: String,
        /// File seen second.
        second: String,
    },

    /// The file name pattern is not a valid regular expression.
    #[error("invalid file pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The pattern matched but its first group is not a number.
    #[error("file pattern must capture the file number in group 1 (file \"{file}\")")]
    MissingNumber {
        /// File name that matched.
        file: String,
    },
}

/// Compiles a file name pattern.
pub fn compile_pattern(pattern: &str) -> DiscoveryResult<Regex> {
    Ok(Regex::new(pattern)?)
}

/// Lists the files in `dir` whose names match `pattern`, ordered by number.
///
/// Sub-directories and files that do not match are skipped.
///
/// # Errors
///
/// Returns `DiscoveryError::DirectoryNotFound` if `dir` is not a directory
/// and `DiscoveryError::DuplicateNumber` if two files share a number.
pub fn discover(dir: &Path, pattern: &Regex) -> DiscoveryResult<Vec<InputTable>> {
    if !dir.is_dir() {
        return Err(DiscoveryError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| DiscoveryError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DiscoveryError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            names.push(name.to_string());
        }
    }
    // Stable duplicate reporting regardless of directory order.
    names.sort();

    let mut by_number: BTreeMap<u32, (String, String)> = BTreeMap::new();
    for name in names {
        let digits = match pattern.captures(&name) {
            Some(captures) => captures.get(1).map(|m| m.as_str().to_string()),
            None => continue,
        };
        let digits =
            digits.ok_or_else(|| DiscoveryError::MissingNumber { file: name.clone() })?;
        let number: u32 = digits
            .parse()
            .map_err(|_| DiscoveryError::MissingNumber { file: name.clone() })?;

        if let Some((first_digits, first)) = by_number.get(&number) {
            return Err(DiscoveryError::DuplicateNumber {
                number: first_digits.clone(),
                first: first.clone(),
                second: name,
            });
        }
        by_number.insert(number, (digits, name));
    }

    let inputs: Vec<InputTable> = by_number
        .into_iter()
        .map(|(number, (_, name))| InputTable::new(number, dir.join(name)))
        .collect();
    debug!(dir = %dir.display(), files = inputs.len(), "discovered input files");
    Ok(inputs)
}
