//! # dealsheet-xlsx
//!
//! Writes a configured [`dealsheet_core::Workbook`] as an XLSX package: cell number
//! formats and fills, conditional formatting rules, and embedded charts.

pub mod error;
pub mod writer;

mod styles;

pub use error::{XlsxError, XlsxResult};
pub use writer::XlsxWriter;
