//! Data series types

use crate::cell::CellRange;
use crate::style::Color;

/// A range on a named sheet that feeds a chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRange {
    /// Sheet holding the data
    pub sheet: String,
    /// Cells on that sheet
    pub range: CellRange,
}

impl SourceRange {
    pub fn new<S: Into<String>>(sheet: S, range: CellRange) -> Self {
        Self {
            sheet: sheet.into(),
            range,
        }
    }

    /// Absolute sheet-qualified reference, e.g. `'Main'!$B$24:$B$28`
    pub fn reference(&self) -> String {
        self.range.sheet_reference(&self.sheet)
    }

    /// One single-column source per column of this range
    pub fn columns(&self) -> Vec<SourceRange> {
        self.range
            .columns()
            .into_iter()
            .map(|range| SourceRange::new(self.sheet.clone(), range))
            .collect()
    }
}

/// One plotted series derived from a chart's source ranges
#[derive(Debug, Clone, PartialEq)]
pub struct DataSeries {
    /// Position among the chart's series (0-based)
    pub index: usize,
    /// Legend label, if one was configured
    pub name: Option<String>,
    /// Category labels (the chart's first source range)
    pub categories: SourceRange,
    /// Values (one column)
    pub values: SourceRange,
    /// Value axis the series is plotted against
    pub target_axis: u8,
    /// Explicit series colour
    pub color: Option<Color>,
}
