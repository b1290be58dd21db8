//! The host interface
//!
//! [`SheetHost`] is the narrow slice of a spreadsheet application's object model that
//! the formatting and chart passes need: range lookup, number formats, backgrounds, the
//! conditional-format rule list and embedded charts. [`crate::Worksheet`] implements it
//! in memory; [`RecordingHost`] wraps any host and logs every call it forwards.

use std::cell::RefCell;
use std::fmt;

use crate::cell::CellRange;
use crate::chart::{Chart, ChartType};
use crate::conditional_format::ConditionalFormatRule;
use crate::error::Result;
use crate::style::{Color, NumberFormat};

/// A sheet handle exposed by a spreadsheet host
///
/// Calls are synchronous and applied in order. Hosts report failures as
/// [`crate::Error`]; callers propagate them unchanged and do not roll back earlier calls.
pub trait SheetHost {
    /// Sheet name
    fn name(&self) -> &str;

    /// Resolve an A1 address on this sheet
    fn range(&self, address: &str) -> Result<CellRange> {
        CellRange::parse(address)
    }

    /// Set the number format of every cell in `range`
    fn set_number_format(&mut self, range: &CellRange, format: &NumberFormat) -> Result<()>;

    /// Set the background colour of every cell in `range`
    fn set_background(&mut self, range: &CellRange, color: Color) -> Result<()>;

    /// Current conditional-format rules, in order
    fn conditional_format_rules(&self) -> Vec<ConditionalFormatRule>;

    /// Replace the conditional-format rule list
    fn set_conditional_format_rules(&mut self, rules: Vec<ConditionalFormatRule>) -> Result<()>;

    /// Charts embedded in this sheet, in insertion order
    fn charts(&self) -> Vec<Chart>;

    /// Embed a new chart
    fn insert_chart(&mut self, chart: Chart) -> Result<()>;

    /// Remove the chart at `index` and return it
    fn remove_chart(&mut self, index: usize) -> Result<Chart>;
}

/// One call forwarded by a [`RecordingHost`]
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    SetNumberFormat {
        sheet: String,
        range: CellRange,
        format: NumberFormat,
    },
    SetBackground {
        sheet: String,
        range: CellRange,
        color: Color,
    },
    GetConditionalFormatRules {
        sheet: String,
    },
    SetConditionalFormatRules {
        sheet: String,
        count: usize,
    },
    GetCharts {
        sheet: String,
    },
    InsertChart {
        sheet: String,
        chart_type: ChartType,
        title: String,
    },
    RemoveChart {
        sheet: String,
        index: usize,
    },
}

impl fmt::Display for HostCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostCall::SetNumberFormat {
                sheet,
                range,
                format,
            } => write!(f, "{}!{} setNumberFormat {}", sheet, range, format),
            HostCall::SetBackground {
                sheet,
                range,
                color,
            } => write!(f, "{}!{} setBackground {}", sheet, range, color),
            HostCall::GetConditionalFormatRules { sheet } => {
                write!(f, "{} getConditionalFormatRules", sheet)
            }
            HostCall::SetConditionalFormatRules { sheet, count } => {
                write!(f, "{} setConditionalFormatRules ({} rules)", sheet, count)
            }
            HostCall::GetCharts { sheet } => write!(f, "{} getCharts", sheet),
            HostCall::InsertChart {
                sheet,
                chart_type,
                title,
            } => write!(f, "{} insertChart {} \"{}\"", sheet, chart_type, title),
            HostCall::RemoveChart { sheet, index } => write!(f, "{} removeChart #{}", sheet, index),
        }
    }
}

/// Wraps a host and records every call it forwards
///
/// ```
/// use dealsheet_core::{HostCall, RecordingHost, SheetHost, Worksheet};
///
/// let mut host = RecordingHost::new(Worksheet::new("Main"));
/// host.conditional_format_rules();
/// assert_eq!(
///     host.calls(),
///     vec![HostCall::GetConditionalFormatRules { sheet: "Main".into() }]
/// );
/// ```
#[derive(Debug)]
pub struct RecordingHost<H> {
    inner: H,
    calls: RefCell<Vec<HostCall>>,
}

impl<H: SheetHost> RecordingHost<H> {
    /// Wrap a host
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Calls recorded so far
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls matching `predicate`
    pub fn count_calls<F: Fn(&HostCall) -> bool>(&self, predicate: F) -> usize {
        self.calls.borrow().iter().filter(|c| predicate(c)).count()
    }

    /// The wrapped host
    pub fn inner(&self) -> &H {
        &self.inner
    }

    fn record(&self, call: HostCall) {
        tracing::trace!("{}", call);
        self.calls.borrow_mut().push(call);
    }
}

impl<H: SheetHost> SheetHost for RecordingHost<H> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn range(&self, address: &str) -> Result<CellRange> {
        self.inner.range(address)
    }

    fn set_number_format(&mut self, range: &CellRange, format: &NumberFormat) -> Result<()> {
        self.record(HostCall::SetNumberFormat {
            sheet: self.inner.name().to_string(),
            range: *range,
            format: format.clone(),
        });
        self.inner.set_number_format(range, format)
    }

    fn set_background(&mut self, range: &CellRange, color: Color) -> Result<()> {
        self.record(HostCall::SetBackground {
            sheet: self.inner.name().to_string(),
            range: *range,
            color,
        });
        self.inner.set_background(range, color)
    }

    fn conditional_format_rules(&self) -> Vec<ConditionalFormatRule> {
        self.record(HostCall::GetConditionalFormatRules {
            sheet: self.inner.name().to_string(),
        });
        self.inner.conditional_format_rules()
    }

    fn set_conditional_format_rules(&mut self, rules: Vec<ConditionalFormatRule>) -> Result<()> {
        self.record(HostCall::SetConditionalFormatRules {
            sheet: self.inner.name().to_string(),
            count: rules.len(),
        });
        self.inner.set_conditional_format_rules(rules)
    }

    fn charts(&self) -> Vec<Chart> {
        self.record(HostCall::GetCharts {
            sheet: self.inner.name().to_string(),
        });
        self.inner.charts()
    }

    fn insert_chart(&mut self, chart: Chart) -> Result<()> {
        self.record(HostCall::InsertChart {
            sheet: self.inner.name().to_string(),
            chart_type: chart.chart_type,
            title: chart.title().to_string(),
        });
        self.inner.insert_chart(chart)
    }

    fn remove_chart(&mut self, index: usize) -> Result<Chart> {
        self.record(HostCall::RemoveChart {
            sheet: self.inner.name().to_string(),
            index,
        });
        self.inner.remove_chart(index)
    }
}
