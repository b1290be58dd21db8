//! Error types for dealsheet-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dealsheet-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Invalid cell range format
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u32, u16),

    /// Colour literal that is not `#rrggbb`
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Chart definition rejected by the host
    #[error("Invalid chart '{title}': {reason}")]
    InvalidChart { title: String, reason: String },

    /// Chart index out of bounds
    #[error("Chart index {0} out of bounds (count: {1})")]
    ChartOutOfBounds(usize, usize),

    /// Failure reported by a host implementation
    #[error("Host error: {0}")]
    Host(String),
}

impl Error {
    /// Create a host error with a message
    pub fn host<S: Into<String>>(msg: S) -> Self {
        Error::Host(msg.into())
    }

    pub(crate) fn invalid_chart<T: Into<String>, R: Into<String>>(title: T, reason: R) -> Self {
        Error::InvalidChart {
            title: title.into(),
            reason: reason.into(),
        }
    }
}
