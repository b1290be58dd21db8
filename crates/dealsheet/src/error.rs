//! Error types for dealsheet

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring or saving a workbook
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the host or the workbook model, passed through unchanged
    #[error(transparent)]
    Core(#[from] dealsheet_core::Error),

    /// Error while writing the XLSX package
    #[error(transparent)]
    Xlsx(#[from] dealsheet_xlsx::XlsxError),

    /// Layout entry that cannot be used
    #[error("Invalid layout: {0}")]
    Layout(String),
}

impl Error {
    pub(crate) fn layout<S: Into<String>>(msg: S) -> Self {
        Error::Layout(msg.into())
    }
}
