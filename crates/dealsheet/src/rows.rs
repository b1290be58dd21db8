//! Row classification for the stock layout

use std::fmt;

/// Section and table header rows (1-based)
pub const HEADER_ROWS: [u32; 11] = [1, 2, 3, 11, 22, 30, 46, 54, 62, 63, 70];

/// Rows where the user types inputs (1-based)
pub const USER_INPUT_ROWS: [u32; 24] = [
    4, 5, 6, 7, 8, 9, 10, 12, 13, 14, 17, 18, 19, 21, 23, 24, 25, 26, 27, 28, 29, 35, 38, 39,
];

/// Whether a 1-based row is a header row
pub fn is_header_row(row: u32) -> bool {
    HEADER_ROWS.contains(&row)
}

/// Whether a 1-based row holds user inputs
pub fn is_user_input_row(row: u32) -> bool {
    USER_INPUT_ROWS.contains(&row)
}

/// What a row of the main sheet holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    Header,
    UserInput,
    /// Neither; eligible for banding
    Plain,
}

impl RowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowKind::Header => "header",
            RowKind::UserInput => "input",
            RowKind::Plain => "plain",
        }
    }
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a row against the stock lists
pub fn classify_row(row: u32) -> RowKind {
    if is_header_row(row) {
        RowKind::Header
    } else if is_user_input_row(row) {
        RowKind::UserInput
    } else {
        RowKind::Plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_rows() {
        assert!(is_header_row(11));
        assert!(!is_header_row(5));
        assert!(is_user_input_row(13));
        assert!(!is_user_input_row(31));
    }

    #[test]
    fn test_out_of_range_rows_are_plain() {
        assert_eq!(classify_row(0), RowKind::Plain);
        assert_eq!(classify_row(71), RowKind::Plain);
        assert_eq!(classify_row(u32::MAX), RowKind::Plain);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify_row(63), RowKind::Header);
        assert_eq!(classify_row(21), RowKind::UserInput);
        assert_eq!(classify_row(31), RowKind::Plain);
        assert_eq!(RowKind::UserInput.to_string(), "input");
    }
}
