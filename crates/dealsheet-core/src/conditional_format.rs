//! Conditional formatting
//!
//! A conditional format rule paints a background colour on the cells of its ranges
//! whenever the cell's numeric value satisfies the rule's condition. Rules live in an
//! ordered per-sheet list; see [`crate::SheetHost::conditional_format_rules`].
//!
//! ## Example
//!
//! ```rust
//! use dealsheet_core::{CellRange, Color, ConditionalFormatRule};
//!
//! // Light green when a cash-flow cell is positive
//! let rule = ConditionalFormatRule::number_greater_than(0.0)
//!     .with_background(Color::rgb(0xb7, 0xe1, 0xcd))
//!     .with_range(CellRange::parse("B31").unwrap());
//!
//! assert!(rule.matches(120.0));
//! assert!(!rule.matches(0.0));
//! ```

use std::fmt;

use crate::cell::CellRange;
use crate::style::Color;

/// A conditional formatting rule
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalFormatRule {
    /// Predicate on the cell value
    pub condition: CfCondition,
    /// Cell ranges this rule applies to
    pub ranges: Vec<CellRange>,
    /// Background applied when the condition holds
    pub background: Option<Color>,
}

impl ConditionalFormatRule {
    /// Create a rule with no ranges and no format
    pub fn new(condition: CfCondition) -> Self {
        Self {
            condition,
            ranges: Vec::new(),
            background: None,
        }
    }

    /// Cells strictly greater than `value`
    pub fn number_greater_than(value: f64) -> Self {
        Self::new(CfCondition::GreaterThan(value))
    }

    /// Cells strictly less than `value`
    pub fn number_less_than(value: f64) -> Self {
        Self::new(CfCondition::LessThan(value))
    }

    /// Cells between `low` and `high`, both ends included
    pub fn number_between(low: f64, high: f64) -> Self {
        Self::new(CfCondition::Between(low.min(high), low.max(high)))
    }

    // === Builder methods ===

    /// Add a cell range to this rule
    pub fn with_range(mut self, range: CellRange) -> Self {
        self.ranges.push(range);
        self
    }

    /// Set the cell ranges for this rule
    pub fn with_ranges(mut self, ranges: Vec<CellRange>) -> Self {
        self.ranges = ranges;
        self
    }

    /// Set the background applied when the rule matches
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Evaluate the condition against a numeric cell value
    pub fn matches(&self, value: f64) -> bool {
        self.condition.matches(value)
    }

    /// Check if this rule applies to a specific cell
    pub fn applies_to(&self, row: u32, col: u16) -> bool {
        self.ranges
            .iter()
            .any(|r| r.contains(&crate::CellAddress::new(row, col)))
    }

    /// Whether the rule targets exactly `range` and nothing else
    pub fn targets_only(&self, range: &CellRange) -> bool {
        self.ranges.len() == 1 && self.ranges[0] == *range
    }
}

impl fmt::Display for ConditionalFormatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranges: Vec<String> = self.ranges.iter().map(|r| r.to_string()).collect();
        write!(f, "{} when {}", ranges.join(","), self.condition)?;
        if let Some(color) = self.background {
            write!(f, " -> {}", color)?;
        }
        Ok(())
    }
}

/// Numeric predicate of a rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CfCondition {
    /// value > x
    GreaterThan(f64),
    /// value < x
    LessThan(f64),
    /// low <= value <= high
    Between(f64, f64),
}

impl CfCondition {
    /// Evaluate the predicate. NaN never matches.
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            CfCondition::GreaterThan(x) => value > x,
            CfCondition::LessThan(x) => value < x,
            CfCondition::Between(low, high) => value >= low && value <= high,
        }
    }

    /// XLSX `cellIs` operator name
    pub fn xlsx_operator(&self) -> &'static str {
        match self {
            CfCondition::GreaterThan(_) => "greaterThan",
            CfCondition::LessThan(_) => "lessThan",
            CfCondition::Between(..) => "between",
        }
    }

    /// Operand(s) in formula order
    pub fn operands(&self) -> Vec<f64> {
        match *self {
            CfCondition::GreaterThan(x) | CfCondition::LessThan(x) => vec![x],
            CfCondition::Between(low, high) => vec![low, high],
        }
    }
}

impl fmt::Display for CfCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CfCondition::GreaterThan(x) => write!(f, "> {}", x),
            CfCondition::LessThan(x) => write!(f, "< {}", x),
            CfCondition::Between(low, high) => write!(f, "between {} and {}", low, high),
        }
    }
}
