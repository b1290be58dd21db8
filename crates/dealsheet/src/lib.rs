//! # dealsheet
//!
//! Formats and charts a real-estate investment analysis workbook.
//!
//! The workbook has a main sheet holding inputs and calculated metrics and a
//! dashboard sheet holding charts. Two passes run against any [`SheetHost`]:
//!
//! - the formatting pass ([`apply_formatting`]) sets number formats, fills,
//!   alternating row banding and cash-flow/DSCR conditional rules on the main sheet
//! - the chart pass ([`add_charts`]) inserts five charts sourced from main-sheet
//!   ranges on the dashboard
//!
//! Every address and colour comes from a [`Layout`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use dealsheet::prelude::*;
//!
//! let layout = Layout::default();
//! let mut workbook = new_workbook(&layout).unwrap();
//! configure_workbook(&mut workbook, &layout, &PassOptions::default()).unwrap();
//! XlsxWriter::write_file(&workbook, "deal.xlsx").unwrap();
//! ```

pub mod charts;
pub mod conditional;
pub mod error;
pub mod formatting;
pub mod layout;
pub mod options;
pub mod prelude;
pub mod rows;

pub use charts::{add_charts, chart_definitions, CHART_TITLES};
pub use conditional::{add_conditional_formatting, build_rules};
pub use error::{Error, Result};
pub use formatting::{apply_formatting, FormattingReport};
pub use layout::Layout;
pub use options::{ChartMode, PassOptions, RuleMode};
pub use rows::{classify_row, is_header_row, is_user_input_row, RowKind};

// Re-export core types
pub use dealsheet_core::{
    CellAddress, CellRange, Chart, ChartType, Color, ConditionalFormatRule, HostCall,
    NumberFormat, RecordingHost, SheetHost, Workbook, Worksheet,
};

// Re-export I/O types
pub use dealsheet_xlsx::{XlsxError, XlsxWriter};

use std::path::Path;

/// Counts of what [`configure_workbook`] did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkbookReport {
    pub formatting: FormattingReport,
    pub charts: usize,
}

/// Create an empty workbook holding the layout's main and dashboard sheets
pub fn new_workbook(layout: &Layout) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    workbook.add_worksheet(&layout.main_sheet)?;
    workbook.add_worksheet(&layout.dashboard_sheet)?;
    Ok(workbook)
}

/// Run the formatting pass on the main sheet, then the chart pass on the dashboard
pub fn configure_workbook(
    workbook: &mut Workbook,
    layout: &Layout,
    options: &PassOptions,
) -> Result<WorkbookReport> {
    let (main, dashboard) = workbook.sheet_pair_mut(&layout.main_sheet, &layout.dashboard_sheet)?;
    let formatting = apply_formatting(main, layout, options)?;
    let charts = add_charts(dashboard, &*main, layout, options)?;
    Ok(WorkbookReport { formatting, charts })
}

/// Extension trait for saving a configured workbook
pub trait WorkbookExt {
    /// Save the workbook as an XLSX package
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

impl WorkbookExt for Workbook {
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("xlsx") => Ok(XlsxWriter::write_file(self, path)?),
            _ => Err(Error::Xlsx(XlsxError::Unsupported(format!(
                "Unsupported file format: {}",
                path.display()
            )))),
        }
    }
}
