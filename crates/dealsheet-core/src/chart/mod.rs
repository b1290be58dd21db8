//! Embedded chart definitions
//!
//! A [`Chart`] is built once from an ordered list of source ranges, a position and an
//! option set, then handed to [`crate::SheetHost::insert_chart`]. The first source range
//! holds the labels; every column of the remaining ranges becomes one [`DataSeries`].

mod axis;
mod definition;
mod legend;
mod options;
mod series;

pub use axis::AxisTitles;
pub use definition::{Chart, ChartPosition, ChartType};
pub use legend::LegendPosition;
pub use options::{ChartOptions, GaugeBand, GaugeOptions, OptionValue, PieSliceText, SeriesOptions};
pub use series::{DataSeries, SourceRange};
