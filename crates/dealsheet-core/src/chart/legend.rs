//! Legend types

/// Legend position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendPosition {
    #[default]
    Right,
    Top,
    Bottom,
    Left,
    /// Legend hidden
    None,
}

impl LegendPosition {
    /// Host option value (`legend.position`)
    pub fn as_str(&self) -> &'static str {
        match self {
            LegendPosition::Right => "right",
            LegendPosition::Top => "top",
            LegendPosition::Bottom => "bottom",
            LegendPosition::Left => "left",
            LegendPosition::None => "none",
        }
    }

    /// DrawingML `legendPos` value, `None` when the legend is hidden
    pub fn xlsx_position(&self) -> Option<&'static str> {
        match self {
            LegendPosition::Right => Some("r"),
            LegendPosition::Top => Some("t"),
            LegendPosition::Bottom => Some("b"),
            LegendPosition::Left => Some("l"),
            LegendPosition::None => None,
        }
    }
}
