use approx::assert_abs_diff_eq;
use timek_rs::core::axis::price_axis_labels;
use timek_rs::core::range::PriceRange;

#[test]
fn label_count_matches_configured_lines_and_ascends() {
    for line_count in 2..8 {
        let labels = price_axis_labels(
            line_count,
            PriceRange { min: 10.0, max: 18.0 },
            None,
            None,
        );
        assert_eq!(labels.values.len(), line_count);
        assert!(labels.values.windows(2).all(|pair| pair[0] < pair[1]));
        assert_abs_diff_eq!(labels.values[0], labels.adjusted_min);
        assert_abs_diff_eq!(labels.values[line_count - 1], labels.adjusted_max);
    }
}

#[test]
fn reference_above_range_lands_exactly_on_the_new_maximum() {
    let labels = price_axis_labels(
        5,
        PriceRange { min: 10.0, max: 20.0 },
        Some(25.0),
        None,
    );
    // new_max = r + (r - min), exactly.
    assert_eq!(labels.adjusted_max, 25.0 + (25.0 - 10.0));
    assert_eq!(labels.adjusted_min, 10.0);
    assert_eq!(labels.values.last().copied(), Some(40.0));
}

#[test]
fn reference_below_range_lands_on_the_new_minimum() {
    let labels = price_axis_labels(
        5,
        PriceRange { min: 10.0, max: 14.0 },
        Some(8.0),
        None,
    );
    // new_min = max(0, r - (max - r)) = 8 - 6.
    assert_eq!(labels.adjusted_min, 2.0);
    assert_eq!(labels.values.first().copied(), Some(2.0));
    assert_eq!(labels.adjusted_max, 14.0);
}

#[test]
fn reference_inside_range_changes_nothing() {
    let labels = price_axis_labels(
        4,
        PriceRange { min: 10.0, max: 14.0 },
        Some(12.0),
        None,
    );
    assert_eq!(labels.adjusted_min, 10.0);
    assert_eq!(labels.adjusted_max, 14.0);
}

#[test]
fn labels_round_to_two_decimals() {
    let labels = price_axis_labels(
        3,
        PriceRange {
            min: 10.111_4,
            max: 10.333_6,
        },
        None,
        None,
    );
    assert_eq!(labels.values[0], 10.11);
    assert_eq!(labels.values[2], 10.33);
}

#[test]
fn amplitude_row_is_absent_without_a_closing_price() {
    let labels = price_axis_labels(4, PriceRange { min: 9.0, max: 11.0 }, None, None);
    assert!(labels.amplitudes.is_empty());

    let labels = price_axis_labels(
        4,
        PriceRange { min: 9.0, max: 11.0 },
        None,
        Some(0.0),
    );
    assert!(labels.amplitudes.is_empty());
}
