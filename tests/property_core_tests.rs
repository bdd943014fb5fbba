use proptest::prelude::*;
use timek_rs::core::axis::price_axis_labels;
use timek_rs::core::coords::PriceMapper;
use timek_rs::core::moving_average::moving_average;
use timek_rs::core::range::PriceRange;
use timek_rs::core::window::{ViewportWindow, ZoomDirection};

proptest! {
    #[test]
    fn price_pixel_round_trip_stays_within_a_cent(
        min in 1.0f64..1_000.0,
        span in 1.0f64..500.0,
        ratio in 0.0f64..1.0,
        height in 100.0f64..2_000.0
    ) {
        let labels = price_axis_labels(
            5,
            PriceRange { min, max: min + span },
            None,
            None,
        );
        let mapper = PriceMapper::from_labels(&labels, height).expect("mapper");
        let price = min + span * ratio;

        let y = mapper.price_to_y(price).expect("in bounds");
        let round_tripped = mapper.y_to_price(y);
        prop_assert!((round_tripped - price).abs() <= 0.01);
    }

    #[test]
    fn labels_are_ascending_and_pinned_to_adjusted_bounds(
        line_count in 2usize..10,
        min in 0.0f64..500.0,
        span in 0.5f64..200.0,
        reference_offset in -50.0f64..50.0
    ) {
        let max = min + span;
        let reference = Some(min + reference_offset);
        let labels = price_axis_labels(
            line_count,
            PriceRange { min, max },
            reference,
            None,
        );

        prop_assert_eq!(labels.values.len(), line_count);
        prop_assert!(labels.values.windows(2).all(|pair| pair[0] <= pair[1]));
        prop_assert!((labels.values[0] - labels.adjusted_min).abs() <= 0.005);
        prop_assert!(
            (labels.values[line_count - 1] - labels.adjusted_max).abs() <= 0.005
        );

        // The reference always lands inside the adjusted range.
        if let Some(reference) = reference {
            let clamped = reference.max(0.0);
            prop_assert!(labels.adjusted_min <= clamped + 0.005);
            prop_assert!(clamped <= labels.adjusted_max + 0.005);
        }
    }

    #[test]
    fn zoom_and_pan_never_break_window_invariants(
        total in 30usize..400,
        ops in prop::collection::vec((0u8..3, -800.0f64..800.0), 1..40)
    ) {
        let mut window = ViewportWindow::new(total, 30);
        for (op, magnitude) in ops {
            match op {
                0 => {
                    window.zoom(ZoomDirection::In, magnitude.abs().max(0.1), 25);
                }
                1 => {
                    window.zoom(ZoomDirection::Out, magnitude.abs().max(0.1), 25);
                }
                _ => {
                    window.pan_by_pixels(magnitude, 10.0, 0.5);
                }
            }

            prop_assert!(window.start_index() <= window.end_index());
            prop_assert!(window.end_index() <= window.total_count());
            prop_assert!(window.visible_count() >= 25.min(total));
            prop_assert!(window.visible_count() <= window.total_count());
        }
    }

    #[test]
    fn short_anchors_always_render_the_sentinel(
        closes in prop::collection::vec(1.0f64..100.0, 1..60),
        period in 2usize..25
    ) {
        for anchor in 0..closes.len().min(period - 1) {
            prop_assert_eq!(moving_average(&closes, anchor, period), "0.00");
        }
    }
}
