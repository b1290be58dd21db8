//! Chart definition

use std::collections::BTreeMap;
use std::fmt;

use super::options::{ChartOptions, OptionValue};
use super::series::{DataSeries, SourceRange};
use crate::cell::CellAddress;
use crate::error::{Error, Result};

/// Chart types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartType {
    Pie,
    Line,
    /// Vertical bars
    Column,
    /// Horizontal bars
    Bar,
    /// Dial with coloured zones showing a single value
    Gauge,
}

impl ChartType {
    /// Host chart type name
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Pie => "PIE",
            ChartType::Line => "LINE",
            ChartType::Column => "COLUMN",
            ChartType::Bar => "BAR",
            ChartType::Gauge => "GAUGE",
        }
    }

    /// Whether the chart plots exactly one value column
    pub fn is_single_series(&self) -> bool {
        matches!(self, ChartType::Pie | ChartType::Gauge)
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a chart sits on its sheet
///
/// The anchor is a 1-based cell (row, column) plus a pixel offset from its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPosition {
    /// Anchor row (1-based)
    pub row: u32,
    /// Anchor column (1-based)
    pub col: u16,
    /// Horizontal offset in pixels
    pub offset_x: u32,
    /// Vertical offset in pixels
    pub offset_y: u32,
}

impl ChartPosition {
    pub const fn new(row: u32, col: u16, offset_x: u32, offset_y: u32) -> Self {
        Self {
            row,
            col,
            offset_x,
            offset_y,
        }
    }

    /// The anchor cell as a 0-based address
    pub fn anchor(&self) -> CellAddress {
        CellAddress::new(self.row.saturating_sub(1), self.col.saturating_sub(1))
    }
}

impl Default for ChartPosition {
    fn default() -> Self {
        Self::new(1, 1, 0, 0)
    }
}

/// Chart definition
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    /// Chart type
    pub chart_type: ChartType,
    /// Source ranges: labels first, then value ranges
    pub ranges: Vec<SourceRange>,
    /// Position anchor
    pub position: ChartPosition,
    /// Options
    pub options: ChartOptions,
}

impl Chart {
    /// Create a new chart
    pub fn new(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            ranges: Vec::new(),
            position: ChartPosition::default(),
            options: ChartOptions::default(),
        }
    }

    /// Append a source range
    pub fn add_range(mut self, range: SourceRange) -> Self {
        self.ranges.push(range);
        self
    }

    /// Set the anchor position
    pub fn with_position(mut self, position: ChartPosition) -> Self {
        self.position = position;
        self
    }

    /// Set chart title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.options.title = Some(title.into());
        self
    }

    /// Set the pixel size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.options.width = Some(width);
        self.options.height = Some(height);
        self
    }

    /// Replace the option set, keeping nothing from before
    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    /// Title, or an empty string
    pub fn title(&self) -> &str {
        self.options.title.as_deref().unwrap_or("")
    }

    /// Host option mapping, see [`ChartOptions::to_option_map`]
    pub fn option_map(&self) -> BTreeMap<String, OptionValue> {
        self.options.to_option_map()
    }

    /// Look up one option by dotted path, e.g. `legend.position`
    pub fn option(&self, path: &str) -> Option<OptionValue> {
        OptionValue::Map(self.option_map()).lookup(path).cloned()
    }

    /// Series plotted by this chart: one per column of every range after the first
    pub fn data_series(&self) -> Vec<DataSeries> {
        let Some((categories, values)) = self.ranges.split_first() else {
            return Vec::new();
        };

        values
            .iter()
            .flat_map(SourceRange::columns)
            .enumerate()
            .map(|(index, values)| {
                let options = self.options.series.get(index);
                DataSeries {
                    index,
                    name: options.and_then(|o| o.label_in_legend.clone()),
                    categories: categories.clone(),
                    values,
                    target_axis: options.map(|o| o.target_axis_index).unwrap_or(0),
                    color: self.options.colors.get(index).copied(),
                }
            })
            .collect()
    }

    /// Check the definition is one a host can build
    pub fn validate(&self) -> Result<()> {
        let fail = |reason: String| Err(Error::invalid_chart(self.title(), reason));

        let Some((labels, values)) = self.ranges.split_first() else {
            return fail("no source ranges".into());
        };
        if values.is_empty() {
            return fail("needs a label range and at least one value range".into());
        }
        if labels.range.col_count() != 1 {
            return fail(format!("label range {} spans more than one column", labels.range));
        }
        for value in values {
            if value.range.row_count() != labels.range.row_count() {
                return fail(format!(
                    "value range {} has {} rows but label range {} has {}",
                    value.range,
                    value.range.row_count(),
                    labels.range,
                    labels.range.row_count()
                ));
            }
        }

        let series_count = self.data_series().len();
        if self.chart_type.is_single_series() && series_count != 1 {
            return fail(format!(
                "{} chart takes one value column, got {}",
                self.chart_type, series_count
            ));
        }
        if self.options.series.len() > series_count {
            return fail(format!(
                "{} series options for {} series",
                self.options.series.len(),
                series_count
            ));
        }

        if self.options.width == Some(0) || self.options.height == Some(0) {
            return fail("zero width or height".into());
        }
        if self.position.row == 0 || self.position.col == 0 {
            return fail("anchor row and column are 1-based".into());
        }

        if let Some(gauge) = &self.options.gauge {
            if self.chart_type != ChartType::Gauge {
                return fail(format!("gauge options on a {} chart", self.chart_type));
            }
            if gauge.min >= gauge.max {
                return fail(format!("gauge min {} is not below max {}", gauge.min, gauge.max));
            }
            for (name, band) in gauge.bands() {
                if band.from > band.to || band.from < gauge.min || band.to > gauge.max {
                    return fail(format!(
                        "{} band {}..{} outside {}..{}",
                        name, band.from, band.to, gauge.min, gauge.max
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::chart::{GaugeOptions, SeriesOptions};
    use crate::cell::CellRange;

    fn source(a1: &str) -> SourceRange {
        SourceRange::new("Main", CellRange::parse(a1).unwrap())
    }

    #[test]
    fn test_series_split_by_column() {
        let mut chart = Chart::new(ChartType::Line)
            .add_range(source("A56:A59"))
            .add_range(source("B56:C59"));
        chart.options.series = vec![
            SeriesOptions::labelled("5-Year Value"),
            SeriesOptions::labelled("10-Year Value"),
        ];

        let series = chart.data_series();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].values.range.to_string(), "B56:B59");
        assert_eq!(series[1].values.range.to_string(), "C56:C59");
        assert_eq!(series[1].name.as_deref(), Some("10-Year Value"));
        assert_eq!(series[0].categories.reference(), "'Main'!$A$56:$A$59");
        chart.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_mismatched_rows() {
        let chart = Chart::new(ChartType::Column)
            .with_title("Cash Flow")
            .add_range(source("A48:A52"))
            .add_range(source("C48:C51"));

        let err = chart.validate().unwrap_err();
        assert!(err.to_string().contains("Cash Flow"));
    }

    #[test]
    fn test_validate_single_series_types() {
        let pie = Chart::new(ChartType::Pie)
            .add_range(source("A24:A28"))
            .add_range(source("B24:C28"));
        assert!(pie.validate().is_err());

        let lonely = Chart::new(ChartType::Gauge).add_range(source("A43"));
        assert!(lonely.validate().is_err());
    }

    #[test]
    fn test_validate_gauge_bands() {
        let mut gauge = Chart::new(ChartType::Gauge)
            .add_range(source("A43"))
            .add_range(source("B43"));
        gauge.options.gauge = Some(GaugeOptions::new(0.0, 30.0).with_green(15.0, 30.0));
        gauge.validate().unwrap();

        gauge.options.gauge = Some(GaugeOptions::new(0.0, 30.0).with_green(15.0, 40.0));
        assert!(gauge.validate().is_err());
    }

    #[test]
    fn test_anchor() {
        assert_eq!(ChartPosition::new(45, 3, 0, 0).anchor(), CellAddress::new(44, 2));
    }
}
