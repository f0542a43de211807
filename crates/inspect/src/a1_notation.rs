/// Spreadsheet column label for a zero-based column number.
///
/// Labels use bijective base 26, so there is no zero digit: `Z` is followed
/// by `AA`, and the last Excel column (16383) is `XFD`.
pub fn column_index_to_letters(col: usize) -> String {
    let mut letters = Vec::new();
    let mut remaining = col + 1;

    while remaining > 0 {
        let digit = (remaining - 1) % 26;
        letters.push(b'A' + digit as u8);
        remaining = (remaining - 1) / 26;
    }

    letters.iter().rev().map(|&b| char::from(b)).collect()
}

/// Cell reference for a zero-based position, e.g. `(19, 3)` is `D20`.
pub fn to_a1_notation(row: usize, col: usize) -> String {
    format!("{}{}", column_index_to_letters(col), row + 1)
}

/// Render an inclusive 0-based rectangle as an A1 range, e.g. "A1:D20".
pub(crate) fn range_to_a1(start: (usize, usize), end: (usize, usize)) -> String {
    format!(
        "{}:{}",
        to_a1_notation(start.0, start.1),
        to_a1_notation(end.0, end.1)
    )
}
