//! Cell styling types
//!
//! - [`CellFormat`] - The formatting a cell carries (number format and background)
//! - [`NumberFormat`] - Display format codes
//! - [`Color`] - RGB colour

mod color;
mod number_format;

pub use color::Color;
pub use number_format::NumberFormat;

/// Formatting stored for a single cell
///
/// `None` means the host default was never overridden.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CellFormat {
    /// Number format
    pub number_format: Option<NumberFormat>,
    /// Background fill colour
    pub background: Option<Color>,
}

impl CellFormat {
    /// Whether nothing has been set
    pub fn is_default(&self) -> bool {
        self.number_format.is_none() && self.background.is_none()
    }
}
