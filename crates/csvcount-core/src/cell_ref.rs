//! Spreadsheet-style cell references (`A1`, `B2`, `AA10`).

/// Converts a 1-indexed column number to its spreadsheet letter code.
///
/// Uses bijective base-26, so `1 -> "A"`, `26 -> "Z"`, `27 -> "AA"`.
/// Column `0` has no letter code and yields an empty string.
pub fn column_letters(column: usize) -> String {
    let mut n = column;
    let mut letters = Vec::new();
    while n > 0 {
        let remainder = (n - 1) % 26;
        letters.push(char::from(b'A' + remainder as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Builds a cell reference from a zero-indexed column and a 1-indexed row.
pub fn cell_reference(column_index: usize, row_number: usize) -> String {
    format!("{}{}", column_letters(column_index + 1), row_number)
}
