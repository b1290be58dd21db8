//! Layout table
//!
//! Maps the semantic parts of the analysis workbook (currency cells, DSCR cells,
//! chart sources, ...) to A1 addresses and colours. [`Layout::default`] describes
//! the stock workbook; a JSON file can override any subset of fields.
//!
//! Addresses are not checked against the workbook's content. A layout that has
//! drifted from its workbook formats the wrong cells.

use serde::{Deserialize, Serialize};

use dealsheet_core::{CellRange, Color, SheetHost};

use crate::error::{Error, Result};
use crate::rows::{RowKind, HEADER_ROWS, USER_INPUT_ROWS};

pub const MAIN_SHEET: &str = "Main";
pub const DASHBOARD_SHEET: &str = "Dashboard";

/// Calculated-cell highlight
pub const FORMULA_BLUE: &str = "#e6f2ff";
/// Alternating row band
pub const BAND_GRAY: &str = "#f3f3f3";
pub const RULE_GREEN: &str = "#b7e1cd";
pub const RULE_RED: &str = "#f4c7c3";
pub const RULE_YELLOW: &str = "#fce8b2";

const CURRENCY_RANGES: &[&str] = &[
    "B4:B9", "B12", "B15", "B17", "B20", "B23:B26", "B28", "B31", "B33", "B36", "B40:B42", "B44",
    "B48:C52", "B56:C59", "B64:D68", "C31", "C33", "C36", "C40:C42", "C44",
];
const PERCENT_RANGES: &[&str] = &[
    "B13", "B18", "B27", "B35", "B38", "B37", "B43", "D48:D52", "A48:A52", "A56:A59", "C37",
    "C43",
];
const MONTHS_RANGES: &[&str] = &["B32", "B66:D66", "C32"];
const RATIO_RANGES: &[&str] = &["B34", "B68:D68", "C34"];
const FORMULA_RANGES: &[&str] = &[
    "B15", "B20", "B31:B34", "B36:B37", "B40:B44", "B48:D52", "B56:C59", "B64:D68", "C31:C34",
    "C36:C37", "C40:C44",
];
const CASH_FLOW_RANGES: &[&str] = &[
    "B31", "B41", "B44", "C48:C52", "B65:D65", "C31", "C41", "C44",
];
const DSCR_RANGES: &[&str] = &["B34", "B68:D68", "C34"];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Complete layout of the analysis workbook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub main_sheet: String,
    pub dashboard_sheet: String,
    pub number_formats: NumberFormatRanges,
    /// Flat fill over the comparison column
    pub highlight: Highlight,
    pub banding: Banding,
    pub header_rows: Vec<u32>,
    pub input_rows: Vec<u32>,
    /// Cells holding formulas, filled after banding
    pub formulas: Highlight,
    pub cash_flow: CashFlowRules,
    pub dscr: DscrRules,
    pub charts: ChartSources,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            main_sheet: MAIN_SHEET.to_string(),
            dashboard_sheet: DASHBOARD_SHEET.to_string(),
            number_formats: NumberFormatRanges::default(),
            highlight: Highlight {
                ranges: vec!["C31:C44".to_string()],
                color: FORMULA_BLUE.to_string(),
            },
            banding: Banding::default(),
            header_rows: HEADER_ROWS.to_vec(),
            input_rows: USER_INPUT_ROWS.to_vec(),
            formulas: Highlight {
                ranges: strings(FORMULA_RANGES),
                color: FORMULA_BLUE.to_string(),
            },
            cash_flow: CashFlowRules::default(),
            dscr: DscrRules::default(),
            charts: ChartSources::default(),
        }
    }
}

impl Layout {
    /// Classify a row against this layout's lists. A row listed as both header
    /// and input counts as a header.
    pub fn row_kind(&self, row: u32) -> RowKind {
        if self.header_rows.contains(&row) {
            RowKind::Header
        } else if self.input_rows.contains(&row) {
            RowKind::UserInput
        } else {
            RowKind::Plain
        }
    }

    /// Rows that receive the band colour
    pub fn banded_rows(&self) -> Vec<u32> {
        (self.banding.first_row..=self.banding.last_row)
            .filter(|row| row % 2 == 0 && self.row_kind(*row) == RowKind::Plain)
            .collect()
    }
}

/// Number format targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormatRanges {
    /// `$#,##0.00`
    pub currency: Vec<String>,
    /// `0.00%`
    pub percent: Vec<String>,
    /// `0.0`
    pub months: Vec<String>,
    /// `0.00`
    pub ratio: Vec<String>,
}

impl Default for NumberFormatRanges {
    fn default() -> Self {
        Self {
            currency: strings(CURRENCY_RANGES),
            percent: strings(PERCENT_RANGES),
            months: strings(MONTHS_RANGES),
            ratio: strings(RATIO_RANGES),
        }
    }
}

/// Ranges painted with one flat colour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Highlight {
    pub ranges: Vec<String>,
    pub color: String,
}

impl Default for Highlight {
    fn default() -> Self {
        Self {
            ranges: Vec::new(),
            color: FORMULA_BLUE.to_string(),
        }
    }
}

/// Alternating row fill over a block of columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Banding {
    pub first_row: u32,
    pub last_row: u32,
    pub first_column: String,
    pub last_column: String,
    pub color: String,
}

impl Default for Banding {
    fn default() -> Self {
        Self {
            first_row: 1,
            last_row: 70,
            first_column: "A".to_string(),
            last_column: "C".to_string(),
            color: BAND_GRAY.to_string(),
        }
    }
}

impl Banding {
    /// The banded columns of one 1-based row, e.g. `A4:C4`
    pub fn row_address(&self, row: u32) -> String {
        format!("{}{}:{}{}", self.first_column, row, self.last_column, row)
    }
}

/// Positive/negative colouring of cash-flow cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CashFlowRules {
    pub ranges: Vec<String>,
    /// Background when the value is above zero
    pub positive_color: String,
    /// Background when the value is below zero
    pub negative_color: String,
}

impl Default for CashFlowRules {
    fn default() -> Self {
        Self {
            ranges: strings(CASH_FLOW_RANGES),
            positive_color: RULE_GREEN.to_string(),
            negative_color: RULE_RED.to_string(),
        }
    }
}

/// Three-band colouring of debt-service-coverage cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DscrRules {
    pub ranges: Vec<String>,
    /// Values above this are healthy
    pub healthy_above: f64,
    /// Values below this are failing
    pub failing_below: f64,
    pub healthy_color: String,
    /// Background for `failing_below..=healthy_above`
    pub marginal_color: String,
    pub failing_color: String,
}

impl Default for DscrRules {
    fn default() -> Self {
        Self {
            ranges: strings(DSCR_RANGES),
            healthy_above: 1.25,
            failing_below: 1.0,
            healthy_color: RULE_GREEN.to_string(),
            marginal_color: RULE_YELLOW.to_string(),
            failing_color: RULE_RED.to_string(),
        }
    }
}

/// Label and value ranges on the main sheet feeding one chart. A field left
/// out of an override is empty and fails when the chart pass resolves it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSource {
    pub labels: String,
    pub values: String,
}

impl ChartSource {
    fn new(labels: &str, values: &str) -> Self {
        Self {
            labels: labels.to_string(),
            values: values.to_string(),
        }
    }
}

/// Sources of the five dashboard charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSources {
    pub expenses: ChartSource,
    pub appreciation: ChartSource,
    pub interest_rate: ChartSource,
    pub scenarios: ChartSource,
    pub roi: ChartSource,
}

impl Default for ChartSources {
    fn default() -> Self {
        Self {
            expenses: ChartSource::new("A24:A28", "B24:B28"),
            appreciation: ChartSource::new("A56:A59", "B56:C59"),
            interest_rate: ChartSource::new("A48:A52", "C48:C52"),
            scenarios: ChartSource::new("A65:A68", "B65:D68"),
            roi: ChartSource::new("A43", "B43"),
        }
    }
}

/// Resolve every address through the host
pub(crate) fn resolve_ranges<H: SheetHost + ?Sized>(
    host: &H,
    addresses: &[String],
) -> Result<Vec<CellRange>> {
    addresses
        .iter()
        .map(|address| host.range(address).map_err(Error::from))
        .collect()
}

pub(crate) fn parse_color(field: &str, hex: &str) -> Result<Color> {
    Color::from_hex(hex).map_err(|_| Error::layout(format!("{field}: '{hex}' is not #rrggbb")))
}
