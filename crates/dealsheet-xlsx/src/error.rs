//! XLSX error types

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur during XLSX writing
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Workbook content that cannot be expressed in XLSX
    #[error("Unsupported content: {0}")]
    Unsupported(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] dealsheet_core::Error),
}
