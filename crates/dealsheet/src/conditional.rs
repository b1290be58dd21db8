//! Conditional formatting builder
//!
//! Cash-flow cells turn green above zero and red below it. DSCR cells get three
//! bands: green above the healthy threshold, yellow from the failing threshold up
//! to and including the healthy one, red below the failing threshold. Both bounds
//! of the yellow band are inclusive so the bands never overlap.

use dealsheet_core::{CellRange, ConditionalFormatRule, SheetHost};

use crate::error::Result;
use crate::layout::{parse_color, resolve_ranges, Layout};
use crate::options::{PassOptions, RuleMode};

/// Rules added per cash-flow range
pub const CASH_FLOW_RULES_PER_RANGE: usize = 2;
/// Rules added per DSCR range
pub const DSCR_RULES_PER_RANGE: usize = 3;

/// Build the layout's cash-flow and DSCR rules, in commit order
pub fn build_rules<H: SheetHost + ?Sized>(
    sheet: &H,
    layout: &Layout,
) -> Result<Vec<ConditionalFormatRule>> {
    let cash_flow = &layout.cash_flow;
    let positive = parse_color("cash_flow.positive_color", &cash_flow.positive_color)?;
    let negative = parse_color("cash_flow.negative_color", &cash_flow.negative_color)?;

    let dscr = &layout.dscr;
    let healthy = parse_color("dscr.healthy_color", &dscr.healthy_color)?;
    let marginal = parse_color("dscr.marginal_color", &dscr.marginal_color)?;
    let failing = parse_color("dscr.failing_color", &dscr.failing_color)?;

    let mut rules = Vec::new();

    for range in resolve_ranges(sheet, &cash_flow.ranges)? {
        rules.push(
            ConditionalFormatRule::number_greater_than(0.0)
                .with_range(range)
                .with_background(positive),
        );
        rules.push(
            ConditionalFormatRule::number_less_than(0.0)
                .with_range(range)
                .with_background(negative),
        );
    }

    for range in resolve_ranges(sheet, &dscr.ranges)? {
        rules.push(
            ConditionalFormatRule::number_greater_than(dscr.healthy_above)
                .with_range(range)
                .with_background(healthy),
        );
        rules.push(
            ConditionalFormatRule::number_between(dscr.failing_below, dscr.healthy_above)
                .with_range(range)
                .with_background(marginal),
        );
        rules.push(
            ConditionalFormatRule::number_less_than(dscr.failing_below)
                .with_range(range)
                .with_background(failing),
        );
    }

    Ok(rules)
}

/// Read the sheet's rule list, add the layout's rules and commit the result.
/// Returns the number of rules added.
pub fn add_conditional_formatting<H: SheetHost + ?Sized>(
    sheet: &mut H,
    layout: &Layout,
    options: &PassOptions,
) -> Result<usize> {
    let fresh = build_rules(&*sheet, layout)?;
    let mut rules = sheet.conditional_format_rules();

    match options.rules {
        RuleMode::Append => {
            let duplicated = rules.iter().filter(|r| fresh.contains(r)).count();
            if duplicated > 0 {
                tracing::warn!(
                    sheet = sheet.name(),
                    duplicated,
                    "appending rules the sheet already has"
                );
            }
        }
        RuleMode::Replace => {
            let targets: Vec<CellRange> = fresh
                .iter()
                .filter_map(|rule| rule.ranges.first().copied())
                .collect();
            let before = rules.len();
            rules.retain(|rule| !targets.iter().any(|range| rule.targets_only(range)));
            if before != rules.len() {
                tracing::warn!(
                    sheet = sheet.name(),
                    removed = before - rules.len(),
                    "replacing existing rules"
                );
            }
        }
    }

    let added = fresh.len();
    rules.extend(fresh);
    tracing::debug!(sheet = sheet.name(), added, total = rules.len(), "committing rules");
    sheet.set_conditional_format_rules(rules)?;
    Ok(added)
}
