//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellRange};
use crate::chart::Chart;
use crate::conditional_format::ConditionalFormatRule;
use crate::error::{Error, Result};
use crate::host::SheetHost;
use crate::style::{CellFormat, Color, NumberFormat};

/// A worksheet held in memory
///
/// Stores only what the passes write: sparse per-cell formatting, the conditional
/// format rule list and the embedded charts. Addresses outside any pre-agreed layout
/// are accepted; only the global row/column limits apply.
#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Formatting keyed by address, row-major
    formats: BTreeMap<CellAddress, CellFormat>,
    /// Conditional formatting rules
    conditional_formats: Vec<ConditionalFormatRule>,
    /// Embedded charts
    charts: Vec<Chart>,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            formats: BTreeMap::new(),
            conditional_formats: Vec::new(),
            charts: Vec::new(),
        }
    }

    // === Cell formatting ===

    /// Formatting of the cell at an A1 address
    pub fn cell_format(&self, address: &str) -> Result<Option<&CellFormat>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_format_at(addr.row, addr.col))
    }

    /// Formatting of the cell at 0-based indices
    pub fn cell_format_at(&self, row: u32, col: u16) -> Option<&CellFormat> {
        self.formats.get(&CellAddress::new(row, col))
    }

    /// Number format of a cell, if one was set
    pub fn number_format_at(&self, row: u32, col: u16) -> Option<&NumberFormat> {
        self.cell_format_at(row, col)
            .and_then(|f| f.number_format.as_ref())
    }

    /// Background of a cell, if one was set
    pub fn background_at(&self, row: u32, col: u16) -> Option<Color> {
        self.cell_format_at(row, col).and_then(|f| f.background)
    }

    /// Iterate over formatted cells, row-major
    pub fn formatted_cells(&self) -> impl Iterator<Item = (CellAddress, &CellFormat)> {
        self.formats.iter().map(|(addr, format)| (*addr, format))
    }

    /// Number of cells carrying any formatting
    pub fn formatted_cell_count(&self) -> usize {
        self.formats.len()
    }

    /// Smallest range covering every formatted cell
    pub fn used_range(&self) -> Option<CellRange> {
        let first = self.formats.keys().next()?;
        let (mut max_row, mut min_col, mut max_col) = (first.row, first.col, first.col);
        for addr in self.formats.keys() {
            max_row = max_row.max(addr.row);
            min_col = min_col.min(addr.col);
            max_col = max_col.max(addr.col);
        }
        Some(CellRange::from_indices(first.row, min_col, max_row, max_col))
    }

    fn update_range<F: Fn(&mut CellFormat)>(&mut self, range: &CellRange, update: F) {
        for addr in range.cells() {
            let format = self.formats.entry(addr).or_default();
            update(format);
            if format.is_default() {
                self.formats.remove(&addr);
            }
        }
    }

    // === Conditional formatting ===

    /// Add a conditional formatting rule at the end of the list
    pub fn add_conditional_format(&mut self, rule: ConditionalFormatRule) {
        self.conditional_formats.push(rule);
    }

    /// Conditional formatting rules, in order
    pub fn conditional_formats(&self) -> &[ConditionalFormatRule] {
        &self.conditional_formats
    }

    /// Number of conditional formatting rules
    pub fn conditional_format_count(&self) -> usize {
        self.conditional_formats.len()
    }

    /// Background a cell shows for `value`: the first matching rule wins,
    /// otherwise the static background
    pub fn effective_background_at(&self, row: u32, col: u16, value: f64) -> Option<Color> {
        self.conditional_formats
            .iter()
            .filter(|r| r.applies_to(row, col) && r.matches(value))
            .find_map(|r| r.background)
            .or_else(|| self.background_at(row, col))
    }

    // === Charts ===

    /// Embedded charts, in insertion order
    pub fn embedded_charts(&self) -> &[Chart] {
        &self.charts
    }

    /// Number of embedded charts
    pub fn chart_count(&self) -> usize {
        self.charts.len()
    }
}

impl SheetHost for Worksheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_number_format(&mut self, range: &CellRange, format: &NumberFormat) -> Result<()> {
        let value = match format {
            NumberFormat::General => None,
            other => Some(other.clone()),
        };
        self.update_range(range, |f| f.number_format = value.clone());
        Ok(())
    }

    fn set_background(&mut self, range: &CellRange, color: Color) -> Result<()> {
        self.update_range(range, |f| f.background = Some(color));
        Ok(())
    }

    fn conditional_format_rules(&self) -> Vec<ConditionalFormatRule> {
        self.conditional_formats.clone()
    }

    fn set_conditional_format_rules(&mut self, rules: Vec<ConditionalFormatRule>) -> Result<()> {
        if let Some(rule) = rules.iter().find(|r| r.ranges.is_empty()) {
            return Err(Error::host(format!("conditional format rule '{}' has no ranges", rule)));
        }
        self.conditional_formats = rules;
        Ok(())
    }

    fn charts(&self) -> Vec<Chart> {
        self.charts.clone()
    }

    fn insert_chart(&mut self, chart: Chart) -> Result<()> {
        chart.validate()?;
        self.charts.push(chart);
        Ok(())
    }

    fn remove_chart(&mut self, index: usize) -> Result<Chart> {
        if index >= self.charts.len() {
            return Err(Error::ChartOutOfBounds(index, self.charts.len()));
        }
        Ok(self.charts.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::chart::{ChartType, SourceRange};

    #[test]
    fn test_number_format_range() {
        let mut sheet = Worksheet::new("Main");
        let range = sheet.range("B48:C52").unwrap();
        sheet.set_number_format(&range, &NumberFormat::currency()).unwrap();

        assert_eq!(sheet.formatted_cell_count(), 10);
        assert_eq!(
            sheet.cell_format("C52").unwrap().and_then(|f| f.number_format.clone()),
            Some(NumberFormat::currency())
        );
        assert!(sheet.cell_format("D52").unwrap().is_none());
    }

    #[test]
    fn test_last_write_wins_and_fields_are_independent() {
        let mut sheet = Worksheet::new("Main");
        let b31 = sheet.range("B31").unwrap();
        sheet.set_background(&b31, Color::rgb(0xf3, 0xf3, 0xf3)).unwrap();
        sheet.set_number_format(&b31, &NumberFormat::currency()).unwrap();
        sheet.set_background(&b31, Color::rgb(0xe6, 0xf2, 0xff)).unwrap();

        let format = sheet.cell_format_at(30, 1).unwrap();
        assert_eq!(format.background, Some(Color::rgb(0xe6, 0xf2, 0xff)));
        assert_eq!(format.number_format, Some(NumberFormat::currency()));
    }

    #[test]
    fn test_general_clears_number_format() {
        let mut sheet = Worksheet::new("Main");
        let b4 = sheet.range("B4").unwrap();
        sheet.set_number_format(&b4, &NumberFormat::percent()).unwrap();
        sheet.set_number_format(&b4, &NumberFormat::General).unwrap();
        assert_eq!(sheet.formatted_cell_count(), 0);
        assert!(sheet.used_range().is_none());
    }

    #[test]
    fn test_used_range() {
        let mut sheet = Worksheet::new("Main");
        let gray = Color::rgb(0xf3, 0xf3, 0xf3);
        for a1 in ["C31:C44", "A4", "B68"] {
            let range = sheet.range(a1).unwrap();
            sheet.set_background(&range, gray).unwrap();
        }
        assert_eq!(sheet.used_range().unwrap().to_string(), "A4:C68");
    }

    #[test]
    fn test_effective_background() {
        let mut sheet = Worksheet::new("Main");
        let b31 = sheet.range("B31").unwrap();
        let blue = Color::rgb(0xe6, 0xf2, 0xff);
        let green = Color::rgb(0xb7, 0xe1, 0xcd);
        sheet.set_background(&b31, blue).unwrap();
        sheet.add_conditional_format(
            ConditionalFormatRule::number_greater_than(0.0)
                .with_background(green)
                .with_range(b31),
        );

        assert_eq!(sheet.effective_background_at(30, 1, 250.0), Some(green));
        assert_eq!(sheet.effective_background_at(30, 1, 0.0), Some(blue));
    }

    #[test]
    fn test_rules_without_ranges_rejected() {
        let mut sheet = Worksheet::new("Main");
        let rules = vec![ConditionalFormatRule::number_less_than(0.0)];
        assert!(sheet.set_conditional_format_rules(rules).is_err());
        assert_eq!(sheet.conditional_format_count(), 0);
    }

    #[test]
    fn test_insert_and_remove_chart() {
        let mut sheet = Worksheet::new("Dashboard");
        let chart = Chart::new(ChartType::Pie)
            .with_title("Expenses")
            .add_range(SourceRange::new("Main", CellRange::parse("A24:A28").unwrap()))
            .add_range(SourceRange::new("Main", CellRange::parse("B24:B28").unwrap()));
        sheet.insert_chart(chart.clone()).unwrap();
        assert_eq!(sheet.chart_count(), 1);

        assert!(sheet.insert_chart(Chart::new(ChartType::Bar)).is_err());
        assert!(sheet.remove_chart(3).is_err());
        assert_eq!(sheet.remove_chart(0).unwrap(), chart);
        assert_eq!(sheet.chart_count(), 0);
    }
}
