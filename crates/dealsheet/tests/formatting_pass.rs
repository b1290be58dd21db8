//! Formatting pass against the in-memory host and a recording host

use dealsheet::prelude::*;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn cells(address: &str) -> Vec<dealsheet::CellAddress> {
    CellRange::parse(address).unwrap().cells().collect()
}

fn formatted_main(options: &PassOptions) -> Worksheet {
    let mut main = Worksheet::new("Main");
    apply_formatting(&mut main, &Layout::default(), options).unwrap();
    main
}

#[test]
fn test_number_formats_after_pass() {
    let layout = Layout::default();
    let main = formatted_main(&PassOptions::default());

    let expected = [
        (&layout.number_formats.currency, NumberFormat::currency()),
        (&layout.number_formats.percent, NumberFormat::percent()),
        (&layout.number_formats.months, NumberFormat::months()),
        (&layout.number_formats.ratio, NumberFormat::ratio()),
    ];
    // Later lists overwrite earlier ones, e.g. B66:D66 is currency then months
    let mut last_write = BTreeMap::new();
    for (addresses, format) in expected {
        for address in addresses {
            for cell in cells(address) {
                last_write.insert(cell, format.clone());
            }
        }
    }

    assert_eq!(main.number_format_at(65, 1), Some(&NumberFormat::months()));
    assert_eq!(main.number_format_at(67, 3), Some(&NumberFormat::ratio()));
    for (cell, format) in &last_write {
        assert_eq!(main.number_format_at(cell.row, cell.col), Some(format), "{cell}");
    }
}

#[test]
fn test_fills_after_pass() {
    let main = formatted_main(&PassOptions::default());
    let blue = Color::from_hex("#e6f2ff").unwrap();
    let gray = Color::from_hex("#f3f3f3").unwrap();

    for cell in cells("C31:C44") {
        assert_eq!(main.background_at(cell.row, cell.col), Some(blue), "{cell}");
    }
    // A16:C16 is a plain even row with no formulas
    for cell in cells("A16:C16") {
        assert_eq!(main.background_at(cell.row, cell.col), Some(gray), "{cell}");
    }
    // Header and input rows stay unbanded
    assert_eq!(main.background_at(1, 0), None);
    assert_eq!(main.background_at(3, 0), None);
    // Odd rows stay unbanded
    assert_eq!(main.background_at(14, 0), None);
}

#[test]
fn test_one_pass_adds_25_rules() {
    let main = formatted_main(&PassOptions::default());
    assert_eq!(main.conditional_format_count(), 2 * 8 + 3 * 3);
}

#[test]
fn test_second_pass_keeps_formats_and_doubles_rules() {
    let layout = Layout::default();
    let options = PassOptions::default();
    let mut main = Worksheet::new("Main");

    apply_formatting(&mut main, &layout, &options).unwrap();
    let formats: Vec<_> = main
        .formatted_cells()
        .map(|(addr, format)| (addr, format.clone()))
        .collect();
    let rules = main.conditional_format_count();

    apply_formatting(&mut main, &layout, &options).unwrap();
    let again: Vec<_> = main
        .formatted_cells()
        .map(|(addr, format)| (addr, format.clone()))
        .collect();

    assert_eq!(formats, again);
    assert_eq!(main.conditional_format_count(), rules * 2);
}

#[test]
fn test_replace_mode_is_idempotent() {
    let layout = Layout::default();
    let options = PassOptions {
        rules: RuleMode::Replace,
        ..Default::default()
    };
    let mut main = Worksheet::new("Main");
    apply_formatting(&mut main, &layout, &options).unwrap();
    let first = main.clone();
    apply_formatting(&mut main, &layout, &options).unwrap();

    assert_eq!(main.conditional_format_count(), 25);
    assert_eq!(main, first);
}

#[test]
fn test_replace_mode_keeps_foreign_rules() {
    let layout = Layout::default();
    let mut main = Worksheet::new("Main");
    let foreign = ConditionalFormatRule::number_greater_than(100.0)
        .with_range(CellRange::parse("B4:B9").unwrap())
        .with_background(Color::rgb(255, 0, 0));
    main.add_conditional_format(foreign.clone());

    let options = PassOptions {
        rules: RuleMode::Replace,
        ..Default::default()
    };
    apply_formatting(&mut main, &layout, &options).unwrap();
    apply_formatting(&mut main, &layout, &options).unwrap();

    assert_eq!(main.conditional_format_count(), 26);
    assert_eq!(main.conditional_formats()[0], foreign);
}

#[test]
fn test_dscr_cell_backgrounds() {
    let main = formatted_main(&PassOptions::default());
    let green = Color::from_hex("#b7e1cd").unwrap();
    let yellow = Color::from_hex("#fce8b2").unwrap();
    let red = Color::from_hex("#f4c7c3").unwrap();

    // B34
    assert_eq!(main.effective_background_at(33, 1, 1.5), Some(green));
    assert_eq!(main.effective_background_at(33, 1, 1.25), Some(yellow));
    assert_eq!(main.effective_background_at(33, 1, 1.0), Some(yellow));
    assert_eq!(main.effective_background_at(33, 1, 0.8), Some(red));
}

#[test]
fn test_host_call_sequence() {
    let mut host = RecordingHost::new(Worksheet::new("Main"));
    apply_formatting(&mut host, &Layout::default(), &PassOptions::default()).unwrap();

    let calls = host.calls();
    let number_formats = host.count_calls(|c| matches!(c, HostCall::SetNumberFormat { .. }));
    let backgrounds = host.count_calls(|c| matches!(c, HostCall::SetBackground { .. }));
    assert_eq!(number_formats, 38);
    // highlight + banded rows + formula ranges
    assert_eq!(backgrounds, 1 + 17 + 11);

    // Number formats come first, currency before percentage
    assert_eq!(
        calls[0],
        HostCall::SetNumberFormat {
            sheet: "Main".into(),
            range: CellRange::parse("B4:B9").unwrap(),
            format: NumberFormat::currency(),
        }
    );
    assert_eq!(
        calls[20],
        HostCall::SetNumberFormat {
            sheet: "Main".into(),
            range: CellRange::parse("B13").unwrap(),
            format: NumberFormat::percent(),
        }
    );

    // Rules are read once and committed once, between highlight and banding
    let get = calls
        .iter()
        .position(|c| matches!(c, HostCall::GetConditionalFormatRules { .. }))
        .unwrap();
    assert_eq!(get, 39);
    assert_eq!(
        calls[40],
        HostCall::SetConditionalFormatRules {
            sheet: "Main".into(),
            count: 25,
        }
    );
    assert_eq!(
        calls[41],
        HostCall::SetBackground {
            sheet: "Main".into(),
            range: CellRange::parse("A16:C16").unwrap(),
            color: Color::from_hex("#f3f3f3").unwrap(),
        }
    );
}

#[test]
fn test_custom_layout_from_json() {
    let layout: Layout = serde_json::from_str(
        r##"{ "main_sheet": "Deal", "banding": { "color": "#eeeeee", "last_row": 20 } }"##,
    )
    .unwrap();
    assert_eq!(layout.dashboard_sheet, "Dashboard");
    assert_eq!(layout.banding.first_row, 1);
    assert_eq!(layout.banded_rows(), vec![16, 20]);

    let mut main = Worksheet::new("Deal");
    let report = apply_formatting(&mut main, &layout, &PassOptions::default()).unwrap();
    assert_eq!(report.banded_rows, 2);
    assert_eq!(main.background_at(15, 0), Some(Color::rgb(0xee, 0xee, 0xee)));
}
