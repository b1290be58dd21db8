//! Formatting pass over the main sheet

use dealsheet_core::{Color, NumberFormat, SheetHost};

use crate::conditional::add_conditional_formatting;
use crate::error::Result;
use crate::layout::{parse_color, Layout};
use crate::options::PassOptions;

/// Counts of what one formatting pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormattingReport {
    /// Ranges given a number format
    pub number_formats: usize,
    /// Ranges given the flat highlight
    pub highlights: usize,
    /// Conditional rules added
    pub rules_added: usize,
    /// Rows given the band colour
    pub banded_rows: usize,
    /// Formula ranges highlighted
    pub formula_ranges: usize,
}

/// Paint number formats, fills, conditional rules and row banding onto the main sheet.
///
/// Steps run in a fixed order: number formats, flat highlight, conditional rules,
/// banding, formula highlight. Later steps overwrite earlier fills. The first host
/// failure aborts the pass; what was already applied stays applied.
pub fn apply_formatting<H: SheetHost + ?Sized>(
    main: &mut H,
    layout: &Layout,
    options: &PassOptions,
) -> Result<FormattingReport> {
    let mut report = FormattingReport::default();

    let formats = &layout.number_formats;
    for (addresses, format) in [
        (&formats.currency, NumberFormat::currency()),
        (&formats.percent, NumberFormat::percent()),
        (&formats.months, NumberFormat::months()),
        (&formats.ratio, NumberFormat::ratio()),
    ] {
        for address in addresses {
            let range = main.range(address)?;
            main.set_number_format(&range, &format)?;
            report.number_formats += 1;
        }
    }

    let color = parse_color("highlight.color", &layout.highlight.color)?;
    report.highlights = fill(main, &layout.highlight.ranges, color)?;

    report.rules_added = add_conditional_formatting(main, layout, options)?;

    let band = parse_color("banding.color", &layout.banding.color)?;
    for row in layout.banded_rows() {
        let range = main.range(&layout.banding.row_address(row))?;
        main.set_background(&range, band)?;
        report.banded_rows += 1;
    }

    let color = parse_color("formulas.color", &layout.formulas.color)?;
    report.formula_ranges = fill(main, &layout.formulas.ranges, color)?;

    tracing::info!(
        sheet = main.name(),
        number_formats = report.number_formats,
        rules_added = report.rules_added,
        banded_rows = report.banded_rows,
        "formatting pass complete"
    );
    Ok(report)
}

/// Each address is looked up and painted before the next one is read
fn fill<H: SheetHost + ?Sized>(host: &mut H, addresses: &[String], color: Color) -> Result<usize> {
    for address in addresses {
        let range = host.range(address)?;
        host.set_background(&range, color)?;
    }
    Ok(addresses.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealsheet_core::Worksheet;

    #[test]
    fn test_report_counts() {
        let mut sheet = Worksheet::new("Main");
        let report = apply_formatting(&mut sheet, &Layout::default(), &PassOptions::default())
            .unwrap();
        assert_eq!(
            report,
            FormattingReport {
                number_formats: 38,
                highlights: 1,
                rules_added: 25,
                banded_rows: 17,
                formula_ranges: 11,
            }
        );
    }

    #[test]
    fn test_formula_fill_wins_over_banding() {
        let mut sheet = Worksheet::new("Main");
        apply_formatting(&mut sheet, &Layout::default(), &PassOptions::default()).unwrap();
        // Row 32 is banded on A..C but B32 and C32 are formula cells
        let gray = Color::from_hex("#f3f3f3").unwrap();
        let blue = Color::from_hex("#e6f2ff").unwrap();
        assert_eq!(sheet.background_at(31, 0), Some(gray));
        assert_eq!(sheet.background_at(31, 1), Some(blue));
        assert_eq!(sheet.background_at(31, 2), Some(blue));
    }

    #[test]
    fn test_bad_address_aborts_without_rollback() {
        let mut layout = Layout::default();
        layout.number_formats.percent.insert(1, "not a range".into());
        let mut sheet = Worksheet::new("Main");
        assert!(apply_formatting(&mut sheet, &layout, &PassOptions::default()).is_err());
        // Currency formats were applied before the failure
        assert_eq!(
            sheet.number_format_at(3, 1),
            Some(&NumberFormat::currency())
        );
        assert_eq!(sheet.conditional_format_count(), 0);
    }

    #[test]
    fn test_bad_address_keeps_earlier_entries_of_its_list() {
        let mut layout = Layout::default();
        layout.number_formats.percent.push("ZZZ".into());
        let mut sheet = Worksheet::new("Main");
        assert!(apply_formatting(&mut sheet, &layout, &PassOptions::default()).is_err());
        // B13 is the first percentage entry
        assert_eq!(sheet.number_format_at(12, 1), Some(&NumberFormat::percent()));
        assert_eq!(sheet.number_format_at(42, 2), Some(&NumberFormat::percent()));
        assert_eq!(sheet.number_format_at(31, 1), None);
    }

    #[test]
    fn test_bad_formula_address_keeps_earlier_fills() {
        let mut layout = Layout::default();
        layout.formulas.ranges.push("B:".into());
        let mut sheet = Worksheet::new("Main");
        assert!(apply_formatting(&mut sheet, &layout, &PassOptions::default()).is_err());
        // B31:B34 was painted before the bad entry
        let blue = Color::from_hex("#e6f2ff").unwrap();
        assert_eq!(sheet.background_at(31, 1), Some(blue));
        assert_eq!(sheet.conditional_format_count(), 25);
    }
}
