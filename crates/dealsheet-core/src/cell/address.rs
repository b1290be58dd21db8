//! Cell address and range types

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "B4")
///
/// Rows and columns are 0-based internally and 1-based / lettered in A1 notation.
/// `$` markers are accepted on input and dropped: the layout never copies formulas,
/// so relative and absolute references address the same cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// Row index (0-based)
    pub row: u32,
    /// Column index (0-based, A=0)
    pub col: u16,
}

impl CellAddress {
    /// Create a new cell address from 0-based indices
    pub const fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Parse a cell address from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use dealsheet_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("B43").unwrap();
    /// assert_eq!(addr.row, 42);
    /// assert_eq!(addr.col, 1);
    ///
    /// assert_eq!(CellAddress::parse("$C$5").unwrap(), CellAddress::new(4, 2));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let unmarked = s.strip_prefix('$').unwrap_or(s);
        let split = unmarked
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(unmarked.len());
        let (letters, rest) = unmarked.split_at(split);

        if letters.is_empty() {
            return Err(Error::InvalidAddress(format!("no column letters in '{}'", s)));
        }
        let col = Self::letters_to_column(letters)?;

        let digits = rest.strip_prefix('$').unwrap_or(rest);
        if digits.is_empty() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }
        let row: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;
        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }
        if row > MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS));
        }

        Ok(Self::new(row - 1, col))
    }

    /// Convert a column index to letters (0 = A, 25 = Z, 26 = AA)
    pub fn column_to_letters(col: u16) -> String {
        let mut letters = Vec::new();
        let mut n = col as u32 + 1;
        while n > 0 {
            n -= 1;
            letters.push((n % 26) as u8 + b'A');
            n /= 26;
        }
        letters.reverse();
        String::from_utf8(letters).unwrap_or_default()
    }

    /// Convert column letters to an index (A = 0, Z = 25, AA = 26)
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
            if col > MAX_COLS as u32 {
                return Err(Error::ColumnOutOfBounds(col, MAX_COLS));
            }
        }

        Ok((col - 1) as u16)
    }

    /// Format as `B4`
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row + 1)
    }

    /// Format as `$B$4`
    pub fn to_absolute_string(&self) -> String {
        format!("${}${}", Self::column_to_letters(self.col), self.row + 1)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A rectangular range of cells (e.g., "B48:C52")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Top-left corner
    pub start: CellAddress,
    /// Bottom-right corner
    pub end: CellAddress,
}

impl CellRange {
    /// Create a range from two corners in any order
    pub fn new(a: CellAddress, b: CellAddress) -> Self {
        Self {
            start: CellAddress::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellAddress::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    /// Create a single-cell range
    pub fn single(addr: CellAddress) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// Create a range from 0-based indices
    pub fn from_indices(start_row: u32, start_col: u16, end_row: u32, end_col: u16) -> Self {
        Self::new(
            CellAddress::new(start_row, start_col),
            CellAddress::new(end_row, end_col),
        )
    }

    /// Parse `A1:B10` or a single cell `B12`
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.split_once(':') {
            Some((_, end)) if end.contains(':') => {
                Err(Error::InvalidRange(format!("too many ':' in '{}'", s)))
            }
            Some((start, end)) => Ok(Self::new(CellAddress::parse(start)?, CellAddress::parse(end)?)),
            None => Ok(Self::single(CellAddress::parse(s)?)),
        }
    }

    /// Check if a cell is within this range
    pub fn contains(&self, addr: &CellAddress) -> bool {
        addr.row >= self.start.row
            && addr.row <= self.end.row
            && addr.col >= self.start.col
            && addr.col <= self.end.col
    }

    /// Whether the range is exactly one cell
    pub fn is_single_cell(&self) -> bool {
        self.start == self.end
    }

    /// Number of rows in the range
    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Number of columns in the range
    pub fn col_count(&self) -> u16 {
        self.end.col - self.start.col + 1
    }

    /// Split the range into one single-column range per column, left to right
    ///
    /// ```
    /// use dealsheet_core::CellRange;
    ///
    /// let columns = CellRange::parse("B56:C59").unwrap().columns();
    /// assert_eq!(columns[0].to_string(), "B56:B59");
    /// assert_eq!(columns[1].to_string(), "C56:C59");
    /// ```
    pub fn columns(&self) -> Vec<CellRange> {
        (self.start.col..=self.end.col)
            .map(|col| CellRange::from_indices(self.start.row, col, self.end.row, col))
            .collect()
    }

    /// Iterate over all cell addresses in the range (row by row)
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            next: Some(self.start),
        }
    }

    /// Format as `B48:C52`, or `B12` for a single cell
    pub fn to_a1_string(&self) -> String {
        if self.is_single_cell() {
            self.start.to_a1_string()
        } else {
            format!("{}:{}", self.start, self.end)
        }
    }

    /// Format as `$B$48:$C$52`
    pub fn to_absolute_string(&self) -> String {
        if self.is_single_cell() {
            self.start.to_absolute_string()
        } else {
            format!(
                "{}:{}",
                self.start.to_absolute_string(),
                self.end.to_absolute_string()
            )
        }
    }

    /// Sheet-qualified absolute reference, e.g. `'Main'!$A$24:$A$28`
    pub fn sheet_reference(&self, sheet: &str) -> String {
        format!("'{}'!{}", sheet.replace('\'', "''"), self.to_absolute_string())
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Iterator over the cells of a range, row-major
pub struct CellRangeIterator {
    range: CellRange,
    next: Option<CellAddress>,
}

impl Iterator for CellRangeIterator {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current.col < self.range.end.col {
            Some(CellAddress::new(current.row, current.col + 1))
        } else if current.row < self.range.end.row {
            Some(CellAddress::new(current.row + 1, self.range.start.col))
        } else {
            None
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(CellAddress::column_to_letters(0), "A");
        assert_eq!(CellAddress::column_to_letters(25), "Z");
        assert_eq!(CellAddress::column_to_letters(26), "AA");
        assert_eq!(CellAddress::column_to_letters(16383), "XFD");

        assert_eq!(CellAddress::letters_to_column("D").unwrap(), 3);
        assert_eq!(CellAddress::letters_to_column("aa").unwrap(), 26);
        assert_eq!(CellAddress::letters_to_column("XFD").unwrap(), 16383);
        assert!(CellAddress::letters_to_column("XFE").is_err());
    }

    #[test]
    fn test_cell_address_parse() {
        assert_eq!(CellAddress::parse("A1").unwrap(), CellAddress::new(0, 0));
        assert_eq!(CellAddress::parse("B43").unwrap(), CellAddress::new(42, 1));
        assert_eq!(CellAddress::parse("$D$68").unwrap(), CellAddress::new(67, 3));
        assert_eq!(CellAddress::parse("c31").unwrap(), CellAddress::new(30, 2));
    }

    #[test]
    fn test_cell_address_parse_errors() {
        assert!(CellAddress::parse("").is_err());
        assert!(CellAddress::parse("B").is_err());
        assert!(CellAddress::parse("12").is_err());
        assert!(CellAddress::parse("B0").is_err());
        assert!(CellAddress::parse("B1048577").is_err());
        assert!(CellAddress::parse("B4x").is_err());
    }

    #[test]
    fn test_cell_range_parse() {
        let range = CellRange::parse("B48:C52").unwrap();
        assert_eq!(range.start, CellAddress::new(47, 1));
        assert_eq!(range.end, CellAddress::new(51, 2));
        assert_eq!(range.row_count(), 5);
        assert_eq!(range.col_count(), 2);

        // Reversed corners are normalised
        assert_eq!(CellRange::parse("C52:B48").unwrap(), range);

        let single = CellRange::parse("B12").unwrap();
        assert!(single.is_single_cell());
        assert_eq!(single.to_string(), "B12");

        assert!(CellRange::parse("A1:B2:C3").is_err());
    }

    #[test]
    fn test_cell_range_iterator() {
        let cells: Vec<_> = CellRange::parse("A1:B2").unwrap().cells().collect();
        assert_eq!(
            cells,
            vec![
                CellAddress::new(0, 0),
                CellAddress::new(0, 1),
                CellAddress::new(1, 0),
                CellAddress::new(1, 1),
            ]
        );
        assert_eq!(CellRange::parse("B66:D66").unwrap().cells().count(), 3);
    }

    #[test]
    fn test_sheet_reference() {
        let range = CellRange::parse("A24:A28").unwrap();
        assert_eq!(range.sheet_reference("Main"), "'Main'!$A$24:$A$28");
        assert_eq!(
            CellRange::parse("B43").unwrap().sheet_reference("Bob's"),
            "'Bob''s'!$B$43"
        );
    }
}
