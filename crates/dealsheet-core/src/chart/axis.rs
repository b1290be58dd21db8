//! Axis types

/// Axis titles of a chart with a category and a value axis
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AxisTitles {
    /// Horizontal axis title (`hAxis.title`)
    pub horizontal: Option<String>,
    /// Vertical axis title (`vAxis.title`)
    pub vertical: Option<String>,
}

impl AxisTitles {
    /// Create axis titles
    pub fn new<H: Into<String>, V: Into<String>>(horizontal: H, vertical: V) -> Self {
        Self {
            horizontal: Some(horizontal.into()),
            vertical: Some(vertical.into()),
        }
    }
}
