use serde::{Deserialize, Serialize};

use crate::core::axis::PriceAxisLabels;

/// Price↔Y mapping over the label-adjusted bounds.
///
/// Y grows downward, so the maximum price maps to 0 and the minimum to the
/// plot height. Construction fails (returns `None`) instead of dividing by a
/// degenerate span or height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceMapper {
    min: f64,
    max: f64,
    height: f64,
}

impl PriceMapper {
    #[must_use]
    pub fn from_labels(labels: &PriceAxisLabels, height: f64) -> Option<Self> {
        if labels.is_empty() || !height.is_finite() || height <= 0.0 {
            return None;
        }

        let min = labels.adjusted_min;
        let max = labels.adjusted_max;
        if !min.is_finite() || !max.is_finite() || max - min <= 0.0 {
            return None;
        }

        Some(Self { min, max, height })
    }

    #[must_use]
    pub fn bounds(self) -> (f64, f64) {
        (self.min, self.max)
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.height
    }

    /// Maps a price to pixel Y; out-of-bounds prices map to `None`.
    #[must_use]
    pub fn price_to_y(self, price: f64) -> Option<f64> {
        if !price.is_finite() || price < self.min || price > self.max {
            return None;
        }

        Some((self.max - price) / (self.max - self.min) * self.height)
    }

    /// Maps pixel Y back to a price, clamping Y into the plot first.
    #[must_use]
    pub fn y_to_price(self, y: f64) -> f64 {
        let clamped = y.clamp(0.0, self.height);
        self.max - clamped / self.height * (self.max - self.min)
    }
}

/// Index↔X mapping for OHLC bars inside the visible window.
///
/// Each visible bar owns an equal horizontal unit; the bar body fills
/// `fill_ratio` of it and the remainder is spacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexMapper {
    unit_width: f64,
    bar_width: f64,
}

impl IndexMapper {
    #[must_use]
    pub fn new(viewport_width: f64, visible_count: usize, fill_ratio: f64) -> Option<Self> {
        if visible_count == 0 || !viewport_width.is_finite() || viewport_width <= 0.0 {
            return None;
        }
        if !fill_ratio.is_finite() || fill_ratio <= 0.0 || fill_ratio > 1.0 {
            return None;
        }

        let unit_width = viewport_width / visible_count as f64;
        Some(Self {
            unit_width,
            bar_width: unit_width * fill_ratio,
        })
    }

    #[must_use]
    pub fn unit_width(self) -> f64 {
        self.unit_width
    }

    #[must_use]
    pub fn bar_width(self) -> f64 {
        self.bar_width
    }

    /// Left edge of the bar body at a slice index.
    #[must_use]
    pub fn bar_x(self, index: usize) -> f64 {
        index as f64 * self.unit_width + (self.unit_width - self.bar_width) / 2.0
    }

    /// Center of the unit cell at a slice index; crosshair anchors here.
    #[must_use]
    pub fn center_x(self, index: usize) -> f64 {
        index as f64 * self.unit_width + self.unit_width / 2.0
    }

    /// Resolves a pointer X into a clamped slice index.
    #[must_use]
    pub fn index_at_x(self, x: f64, len: usize) -> Option<usize> {
        if len == 0 || !x.is_finite() {
            return None;
        }

        let candidate = (x / self.unit_width).floor();
        if candidate < 0.0 {
            return Some(0);
        }

        Some((candidate as usize).min(len - 1))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::{IndexMapper, PriceMapper};
    use crate::core::axis::price_axis_labels;
    use crate::core::range::PriceRange;

    fn mapper(min: f64, max: f64, height: f64) -> PriceMapper {
        let labels = price_axis_labels(5, PriceRange { min, max }, None, None);
        PriceMapper::from_labels(&labels, height).expect("valid mapper")
    }

    #[test]
    fn price_round_trip_stays_within_a_cent() {
        let mapper = mapper(10.0, 18.0, 400.0);
        for price in [10.0, 12.5, 15.0, 18.0] {
            let y = mapper.price_to_y(price).expect("in bounds");
            assert_abs_diff_eq!(mapper.y_to_price(y), price, epsilon = 0.01);
        }
    }

    #[test]
    fn out_of_bounds_price_maps_to_none() {
        let mapper = mapper(10.0, 18.0, 400.0);
        assert!(mapper.price_to_y(9.99).is_none());
        assert!(mapper.price_to_y(18.01).is_none());
    }

    #[test]
    fn higher_price_maps_to_smaller_y() {
        let mapper = mapper(10.0, 18.0, 400.0);
        let low_y = mapper.price_to_y(11.0).expect("low");
        let high_y = mapper.price_to_y(17.0).expect("high");
        assert!(high_y < low_y);
    }

    #[test]
    fn degenerate_inputs_refuse_construction() {
        let labels = price_axis_labels(3, PriceRange { min: 5.0, max: 5.0 }, None, None);
        assert!(PriceMapper::from_labels(&labels, 400.0).is_none());

        let labels = price_axis_labels(3, PriceRange { min: 1.0, max: 2.0 }, None, None);
        assert!(PriceMapper::from_labels(&labels, 0.0).is_none());
    }

    #[test]
    fn bar_body_is_centered_in_its_unit() {
        let mapper = IndexMapper::new(1000.0, 20, 0.8).expect("mapper");
        assert_abs_diff_eq!(mapper.unit_width(), 50.0);
        assert_abs_diff_eq!(mapper.bar_width(), 40.0);
        assert_abs_diff_eq!(mapper.bar_x(3), 155.0);
        assert_abs_diff_eq!(mapper.center_x(3), 175.0);
    }

    #[test]
    fn pointer_index_clamps_to_slice_edges() {
        let mapper = IndexMapper::new(1000.0, 20, 0.8).expect("mapper");
        assert_eq!(mapper.index_at_x(-10.0, 20), Some(0));
        assert_eq!(mapper.index_at_x(2_000.0, 20), Some(19));
        assert_eq!(mapper.index_at_x(260.0, 20), Some(5));
        assert_eq!(mapper.index_at_x(260.0, 0), None);
    }
}
