//! Pass options

/// What the conditional-formatting builder does with rules it finds on the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleMode {
    /// Keep every existing rule and append a fresh set. Repeated passes
    /// accumulate duplicates.
    #[default]
    Append,
    /// Drop existing rules that target exactly one of the layout's cash-flow or
    /// DSCR ranges before appending, so repeated passes leave one set.
    Replace,
}

/// What the chart pass does with charts already on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartMode {
    /// Insert the five charts on every call
    #[default]
    Append,
    /// Remove dashboard charts whose title matches one of the five first
    Replace,
}

/// Options shared by the formatting and chart passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassOptions {
    pub rules: RuleMode,
    pub charts: ChartMode,
}

impl PassOptions {
    /// Options under which rerunning both passes changes nothing
    pub fn rebuild() -> Self {
        Self {
            rules: RuleMode::Replace,
            charts: ChartMode::Replace,
        }
    }
}
