use serde::{Deserialize, Serialize};

use crate::core::format::{amplitude_percent, round2};
use crate::core::range::PriceRange;

/// Derived price-axis tick set for one render pass.
///
/// `values` is ascending with exactly the configured line count; the first
/// and last entries sit on the adjusted bounds. `amplitudes` parallels
/// `values` when a closing price is configured, otherwise it is empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceAxisLabels {
    pub values: Vec<f64>,
    pub amplitudes: Vec<String>,
    pub adjusted_min: f64,
    pub adjusted_max: f64,
}

impl PriceAxisLabels {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Converts a price range + line count into evenly spaced tick labels.
///
/// When a reference price falls outside the raw range, the range widens
/// symmetrically so the reference lands exactly on the new boundary:
/// `new_max = r + (r - min)` above, `new_min = max(0, r - (max - r))` below.
#[must_use]
pub fn price_axis_labels(
    line_count: usize,
    range: PriceRange,
    reference_price: Option<f64>,
    closing_price: Option<f64>,
) -> PriceAxisLabels {
    if line_count == 0 {
        return PriceAxisLabels::default();
    }

    let (mut min, mut max) = (range.min, range.max);
    if let Some(reference) = reference_price.filter(|value| value.is_finite()) {
        if reference > max {
            max = reference + (reference - min);
        } else if reference < min {
            min = (reference - (max - reference)).max(0.0);
        }
    }

    let values = if line_count == 1 {
        vec![round2(min)]
    } else {
        let span = max - min;
        let denominator = (line_count - 1) as f64;
        (0..line_count)
            .map(|index| {
                let ratio = (index as f64) / denominator;
                round2(min + span * ratio)
            })
            .collect()
    };

    let amplitudes = match closing_price.filter(|closing| *closing > 0.0) {
        Some(closing) => values
            .iter()
            .map(|value| amplitude_percent(*value, closing).unwrap_or_default())
            .collect(),
        None => Vec::new(),
    };

    PriceAxisLabels {
        values,
        amplitudes,
        adjusted_min: min,
        adjusted_max: max,
    }
}

#[cfg(test)]
mod tests {
    use super::price_axis_labels;
    use crate::core::range::PriceRange;

    #[test]
    fn zero_lines_produce_no_labels() {
        let labels = price_axis_labels(0, PriceRange { min: 1.0, max: 2.0 }, None, None);
        assert!(labels.is_empty());
        assert!(labels.amplitudes.is_empty());
    }

    #[test]
    fn single_line_is_the_minimum() {
        let labels = price_axis_labels(1, PriceRange { min: 3.0, max: 9.0 }, None, None);
        assert_eq!(labels.values, vec![3.0]);
    }

    #[test]
    fn two_lines_are_the_bounds() {
        let labels = price_axis_labels(2, PriceRange { min: 3.0, max: 9.0 }, None, None);
        assert_eq!(labels.values, vec![3.0, 9.0]);
    }

    #[test]
    fn reference_above_widens_to_exact_boundary() {
        let labels = price_axis_labels(
            5,
            PriceRange { min: 10.0, max: 20.0 },
            Some(22.0),
            None,
        );
        assert_eq!(labels.adjusted_max, 22.0 + (22.0 - 10.0));
        assert_eq!(labels.values.last().copied(), Some(34.0));
    }

    #[test]
    fn reference_below_clamps_at_zero() {
        let labels = price_axis_labels(
            3,
            PriceRange { min: 2.0, max: 30.0 },
            Some(1.0),
            None,
        );
        // 1 - (30 - 1) would be negative, so the floor wins.
        assert_eq!(labels.adjusted_min, 0.0);
        assert_eq!(labels.values.first().copied(), Some(0.0));
    }

    #[test]
    fn amplitudes_parallel_values_when_closing_known() {
        let labels = price_axis_labels(
            3,
            PriceRange { min: 90.0, max: 110.0 },
            None,
            Some(100.0),
        );
        assert_eq!(labels.amplitudes.len(), labels.values.len());
        assert_eq!(labels.amplitudes[0], "-10.00%");
        assert_eq!(labels.amplitudes[2], "+10.00%");
    }
}
