//! Cell addressing
//!
//! - [`CellAddress`] - A cell's location (e.g., "B4")
//! - [`CellRange`] - A rectangular block of cells (e.g., "B48:C52")

mod address;

pub use address::{CellAddress, CellRange, CellRangeIterator};
