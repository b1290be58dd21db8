//! Row classifier properties

use dealsheet::layout::Layout;
use dealsheet::rows::{HEADER_ROWS, USER_INPUT_ROWS};
use dealsheet::{classify_row, is_header_row, is_user_input_row, RowKind};
use proptest::prelude::*;

#[test]
fn test_spot_checks() {
    assert!(is_header_row(11));
    assert!(!is_header_row(5));
    assert!(is_user_input_row(13));
    assert!(!is_user_input_row(31));
}

#[test]
fn test_no_row_is_header_and_input() {
    for row in 1..=70 {
        assert!(
            !(is_header_row(row) && is_user_input_row(row)),
            "row {row} is both header and input"
        );
    }
}

#[test]
fn test_lists_are_sorted_and_unique() {
    assert!(HEADER_ROWS.windows(2).all(|w| w[0] < w[1]));
    assert!(USER_INPUT_ROWS.windows(2).all(|w| w[0] < w[1]));
}

proptest! {
    #[test]
    fn prop_classification_is_exclusive(row in 0u32..200) {
        let kind = classify_row(row);
        prop_assert_eq!(kind == RowKind::Header, is_header_row(row));
        prop_assert_eq!(kind == RowKind::UserInput, is_user_input_row(row));
        prop_assert!(!(is_header_row(row) && is_user_input_row(row)));
    }

    #[test]
    fn prop_default_layout_matches_stock_lists(row in 0u32..200) {
        prop_assert_eq!(Layout::default().row_kind(row), classify_row(row));
    }

    #[test]
    fn prop_banded_rows_are_even_and_plain(row in 1u32..=70) {
        let banded = Layout::default().banded_rows().contains(&row);
        prop_assert_eq!(banded, row % 2 == 0 && classify_row(row) == RowKind::Plain);
    }
}
