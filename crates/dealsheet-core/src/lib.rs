//! # dealsheet-core
//!
//! Core data structures for the dealsheet workbook configurator.
//!
//! This crate provides the types the formatting and chart passes are written against:
//! - [`CellAddress`] and [`CellRange`] - A1 addressing
//! - [`Color`] and [`NumberFormat`] - Cell styling primitives
//! - [`ConditionalFormatRule`] - Value-driven background rules
//! - [`Chart`] - Embedded chart definitions
//! - [`SheetHost`] - The narrow interface a spreadsheet host exposes to the passes
//! - [`Workbook`], [`Worksheet`] - An in-memory host
//!
//! ## Example
//!
//! ```rust
//! use dealsheet_core::{Color, NumberFormat, SheetHost, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let index = workbook.add_worksheet("Main").unwrap();
//! let sheet = workbook.worksheet_mut(index).unwrap();
//!
//! let range = sheet.range("B4:B9").unwrap();
//! sheet.set_number_format(&range, &NumberFormat::currency()).unwrap();
//! sheet.set_background(&range, Color::from_hex("#e6f2ff").unwrap()).unwrap();
//! ```

pub mod cell;
pub mod chart;
pub mod conditional_format;
pub mod error;
pub mod host;
pub mod style;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellRange};
pub use chart::{
    AxisTitles, Chart, ChartOptions, ChartPosition, ChartType, DataSeries, GaugeBand,
    GaugeOptions, LegendPosition, OptionValue, PieSliceText, SeriesOptions, SourceRange,
};
pub use conditional_format::{CfCondition, ConditionalFormatRule};
pub use error::{Error, Result};
pub use host::{HostCall, RecordingHost, SheetHost};
pub use style::{CellFormat, Color, NumberFormat};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
