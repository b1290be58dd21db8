//! Prelude module - common imports for dealsheet users
//!
//! ```rust
//! use dealsheet::prelude::*;
//! ```

pub use crate::{
    // Passes
    add_charts,
    add_conditional_formatting,
    apply_formatting,
    classify_row,
    configure_workbook,
    new_workbook,

    CellRange,
    Chart,
    ChartMode,
    ChartType,
    Color,
    ConditionalFormatRule,
    // Error types
    Error,
    HostCall,
    Layout,
    NumberFormat,
    PassOptions,
    RecordingHost,
    Result,
    RowKind,
    RuleMode,
    SheetHost,
    // Main types
    Workbook,
    WorkbookExt,
    WorkbookReport,
    Worksheet,

    // I/O types
    XlsxWriter,
};
