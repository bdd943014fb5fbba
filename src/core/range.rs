use chrono::DateTime;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{BarPoint, TimePoint};

/// Raw price envelope of the visible slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Most extreme bar of the visible slice, with its slice-local index.
///
/// Ties resolve to the first occurrence so the annotated bar is stable while
/// newer equal extremes stream in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcExtremes {
    pub high: f64,
    pub high_index: usize,
    pub low: f64,
    pub low_index: usize,
}

/// One down-sampled x-axis label anchored to a slice index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XAxisLabel {
    pub index: usize,
    pub label: String,
}

/// Scans bar highs/lows for the price envelope. Empty slice → `None`.
#[must_use]
pub fn price_range_of_bars(bars: &[BarPoint]) -> Option<PriceRange> {
    if bars.is_empty() {
        return None;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for bar in bars {
        min = min.min(bar.low);
        max = max.max(bar.high);
    }

    Some(PriceRange { min, max })
}

/// Scans point prices for the price envelope. Empty slice → `None`.
#[must_use]
pub fn price_range_of_points(points: &[TimePoint]) -> Option<PriceRange> {
    if points.is_empty() {
        return None;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for point in points {
        min = min.min(point.price);
        max = max.max(point.price);
    }

    Some(PriceRange { min, max })
}

/// Finds the highest high and lowest low of the slice.
#[must_use]
pub fn ohlc_extremes(bars: &[BarPoint]) -> Option<OhlcExtremes> {
    // max_by_key keeps the last maximal element, so the reversed walk yields
    // the first occurrence; min_by_key already keeps the first minimal one.
    let (high_index, high_bar) = bars
        .iter()
        .enumerate()
        .rev()
        .max_by_key(|(_, bar)| OrderedFloat(bar.high))?;
    let (low_index, low_bar) = bars
        .iter()
        .enumerate()
        .min_by_key(|(_, bar)| OrderedFloat(bar.low))?;

    Some(OhlcExtremes {
        high: high_bar.high,
        high_index,
        low: low_bar.low,
        low_index,
    })
}

/// Down-samples bar timestamps into date labels.
///
/// Stride is `floor(N / tick_count)` with a floor of one; the final bar is
/// force-included even when it falls off-stride so the right edge always
/// carries a label.
#[must_use]
pub fn downsample_x_labels(bars: &[BarPoint], tick_count: usize) -> Vec<XAxisLabel> {
    if bars.is_empty() || tick_count == 0 {
        return Vec::new();
    }

    let stride = (bars.len() / tick_count).max(1);
    let mut labels: Vec<XAxisLabel> = (0..bars.len())
        .step_by(stride)
        .map(|index| XAxisLabel {
            index,
            label: date_label(bars[index].timestamp),
        })
        .collect();

    let last_index = bars.len() - 1;
    if labels.last().is_none_or(|label| label.index != last_index) {
        labels.push(XAxisLabel {
            index: last_index,
            label: date_label(bars[last_index].timestamp),
        });
    }

    labels
}

fn date_label(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|time| time.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{downsample_x_labels, ohlc_extremes, price_range_of_bars};
    use crate::core::BarPoint;

    fn bar(timestamp: i64, low: f64, high: f64) -> BarPoint {
        BarPoint::new(timestamp, low + 0.5, high, low, high - 0.5, 100.0, 1_000.0)
    }

    #[test]
    fn empty_slices_yield_empty_outputs() {
        assert!(price_range_of_bars(&[]).is_none());
        assert!(ohlc_extremes(&[]).is_none());
        assert!(downsample_x_labels(&[], 3).is_empty());
    }

    #[test]
    fn extremes_keep_first_occurrence_on_ties() {
        let bars = vec![
            bar(0, 10.0, 20.0),
            bar(1, 9.0, 20.0),
            bar(2, 9.0, 18.0),
        ];
        let extremes = ohlc_extremes(&bars).expect("extremes");
        assert_eq!(extremes.high_index, 0);
        assert_eq!(extremes.low_index, 1);
    }

    #[test]
    fn final_bar_is_always_labelled() {
        let bars: Vec<BarPoint> = (0..10)
            .map(|i| bar(1_700_000_000_000 + i * 86_400_000, 10.0, 20.0))
            .collect();
        let labels = downsample_x_labels(&bars, 3);
        assert_eq!(labels.last().map(|l| l.index), Some(9));
    }
}
