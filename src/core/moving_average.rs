use crate::core::format::fixed2;

/// Sentinel rendered when a trailing window cannot be formed.
pub const MA_EMPTY: &str = "0.00";

/// Trailing mean of exactly `period` closes ending at `anchor`, formatted to
/// two decimals.
///
/// Anchors without a full window behind them (and series shorter than the
/// period) render the `"0.00"` sentinel rather than a partial average. The
/// anchor follows the crosshair, so this recomputes for any hovered bar, not
/// only the latest one.
#[must_use]
pub fn moving_average(closes: &[f64], anchor: usize, period: usize) -> String {
    if period == 0 || closes.len() < period || anchor >= closes.len() {
        return MA_EMPTY.to_owned();
    }
    if anchor < period - 1 {
        return MA_EMPTY.to_owned();
    }

    let window = &closes[anchor + 1 - period..=anchor];
    let sum: f64 = window.iter().sum();
    fixed2(sum / period as f64)
}
