//! Delimited text codec for input tables, filter grids, results and error logs.
//!
//! Every file this crate touches is a comma-separated, double-quote-escaped
//! grid of string cells. Rows may be ragged; interpretation of cells (headers,
//! conditions, numbers) happens in the layers above.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ReaderBuilder, Terminator, WriterBuilder};
use thiserror::Error;

/// A grid of string cells, one `Vec` per record.
pub type Grid = Vec<Vec<String>>;

/// A specialized Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Errors raised while reading or writing delimited files.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The file exists but could not be opened or created.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        /// Path that was requested.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file contents are not valid delimited text.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path being read.
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Writing records to the file failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Path being written.
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl CodecError {
    /// Returns the path of the file involved in the error.
    pub fn path(&self) -> &Path {
        match self {
            CodecError::NotFound { path }
            | CodecError::Open { path, .. }
            | CodecError::Read { path, .. }
            | CodecError::Write { path, .. } => path,
        }
    }
}

/// Parses every record from `reader` into a [`Grid`].
///
/// No row is treated as a header. `\n`, `\r\n` and `\r` all terminate records,
/// and a leading UTF-8 byte-order mark is dropped. A blank line between
/// records becomes an empty row, so row `n` of the grid is line `n` of a
/// spreadsheet view of the file. Invalid UTF-8 is replaced with U+FFFD.
pub fn parse_grid<R: Read>(mut reader: R) -> csv::Result<Grid> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let mut records = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes.as_slice());

    let mut grid = Grid::new();
    let mut record = ByteRecord::new();
    while records.read_byte_record(&mut record)? {
        // The record position is taken before the reader skips blank lines.
        let start = record.position().map_or(0, |pos| pos.byte() as usize);
        let end = records.position().byte() as usize;
        for _ in 0..blank_lines_before(&bytes, start, end) {
            grid.push(Vec::new());
        }

        grid.push(
            record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect(),
        );
    }

    Ok(grid)
}

/// Counts the blank lines at the start of `bytes[start..end]`, the span the
/// reader consumed for one record.
fn blank_lines_before(bytes: &[u8], start: usize, end: usize) -> usize {
    let mut pos = start;
    if start == 0 && bytes.starts_with(UTF8_BOM) {
        pos = UTF8_BOM.len();
    } else if start > 0 && bytes[start - 1] == b'\r' && bytes.get(start) == Some(&b'\n') {
        // Second half of the `\r\n` that ended the previous record.
        pos += 1;
    }

    let mut blanks = 0;
    while pos < end {
        match bytes[pos] {
            b'\n' => pos += 1,
            b'\r' => {
                pos += 1;
                if bytes.get(pos) == Some(&b'\n') {
                    pos += 1;
                }
            }
            _ => break,
        }
        blanks += 1;
    }
    blanks
}

/// Reads the file at `path` into a [`Grid`].
pub fn read_grid(path: &Path) -> CodecResult<Grid> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let grid = parse_grid(file).map_err(|source| CodecError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), rows = grid.len(), "read grid");
    Ok(grid)
}

/// Writes `rows` to `writer`, quoting only where needed and terminating every
/// record with `\r\n`.
pub fn write_records<W, R, S>(writer: W, rows: impl IntoIterator<Item = R>) -> csv::Result<()>
where
    W: Write,
    R: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::CRLF)
        .from_writer(writer);

    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `rows` to the file at `path`, replacing any existing content.
pub fn write_grid<R, S>(path: &Path, rows: impl IntoIterator<Item = R>) -> CodecResult<()>
where
    R: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let file = File::create(path).map_err(|e| open_error(path, e))?;
    write_records(file, rows).map_err(|source| CodecError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "wrote grid");
    Ok(())
}

fn open_error(path: &Path, e: io::Error) -> CodecError {
    if e.kind() == io::ErrorKind::NotFound {
        CodecError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        CodecError::Open {
            path: path.to_path_buf(),
            source: e,
        }
    }
}
