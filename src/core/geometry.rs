use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::coords::{IndexMapper, PriceMapper};
use crate::core::{BarPoint, TimePoint, TradingCalendar};

/// Minimum candle body height so dojis stay visible.
pub const MIN_BODY_HEIGHT_PX: f64 = 2.0;

/// Default annotation line length for high/low markers.
pub const EXTREME_LINE_LENGTH_PX: f64 = 80.0;

/// Default gap between an extreme marker line and its label.
pub const EXTREME_TEXT_MARGIN_PX: f64 = 5.0;

/// Projected candle geometry in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub index: usize,
    pub body_x: f64,
    pub body_width: f64,
    pub body_top: f64,
    pub body_height: f64,
    pub wick_x: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub is_bullish: bool,
}

/// One colored polyline segment of the intraday curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub rising: bool,
}

/// One volume histogram bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeBar {
    pub x: f64,
    pub width: f64,
    pub height: f64,
    pub rising: bool,
}

/// Placement of a high/low annotation (line + dot + label anchor).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtremeMarker {
    pub y: f64,
    pub line_start_x: f64,
    pub line_end_x: f64,
    pub text_x: f64,
    pub circle_x: f64,
    pub flipped: bool,
}

/// Projects visible bars into deterministic candle geometry.
///
/// The function is pure so it can back both rendering and regression tests.
/// Bars whose prices fall outside the mapper bounds are skipped rather than
/// clamped into a lying shape.
#[must_use]
pub fn project_candles(
    bars: &[BarPoint],
    price_mapper: PriceMapper,
    index_mapper: IndexMapper,
) -> Vec<CandleGeometry> {
    #[cfg(feature = "parallel-projection")]
    {
        bars.par_iter()
            .enumerate()
            .filter_map(|(index, bar)| project_single_candle(index, *bar, price_mapper, index_mapper))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        bars.iter()
            .enumerate()
            .filter_map(|(index, bar)| project_single_candle(index, *bar, price_mapper, index_mapper))
            .collect()
    }
}

fn project_single_candle(
    index: usize,
    bar: BarPoint,
    price_mapper: PriceMapper,
    index_mapper: IndexMapper,
) -> Option<CandleGeometry> {
    let y_open = price_mapper.price_to_y(bar.open)?;
    let y_close = price_mapper.price_to_y(bar.close)?;
    let y_high = price_mapper.price_to_y(bar.high)?;
    let y_low = price_mapper.price_to_y(bar.low)?;

    Some(CandleGeometry {
        index,
        body_x: index_mapper.bar_x(index),
        body_width: index_mapper.bar_width(),
        body_top: y_open.min(y_close),
        body_height: (y_close - y_open).abs().max(MIN_BODY_HEIGHT_PX),
        wick_x: index_mapper.center_x(index),
        wick_top: y_high,
        wick_bottom: y_low,
        is_bullish: bar.is_bullish(),
    })
}

/// Projects the intraday curve as one uncolored vertex run.
///
/// Points outside the trading calendar are skipped, which renders session
/// breaks as a straight bridge exactly like the source data implies.
#[must_use]
pub fn polyline_points(
    points: &[TimePoint],
    calendar: &TradingCalendar,
    price_mapper: PriceMapper,
    viewport_width: f64,
) -> Vec<(f64, f64)> {
    points
        .iter()
        .filter_map(|point| {
            let ordinal = calendar.ordinal_of_timestamp(point.timestamp)?;
            let x = calendar.x_for_ordinal(ordinal, viewport_width)?;
            let y = price_mapper.price_to_y(point.price)?;
            Some((x, y))
        })
        .collect()
}

/// Projects the intraday curve as rise/fall classified segments.
///
/// A segment is `rising` when its right endpoint trades at or above the
/// closing price, the coloring rule the hosting shell binds to.
#[must_use]
pub fn polyline_segments(
    points: &[TimePoint],
    calendar: &TradingCalendar,
    price_mapper: PriceMapper,
    viewport_width: f64,
    closing_price: f64,
) -> Vec<LineSegment> {
    let mut segments = Vec::new();
    for pair in points.windows(2) {
        let (prev, cur) = (pair[0], pair[1]);
        let Some(prev_ordinal) = calendar.ordinal_of_timestamp(prev.timestamp) else {
            continue;
        };
        let Some(cur_ordinal) = calendar.ordinal_of_timestamp(cur.timestamp) else {
            continue;
        };
        let (Some(x1), Some(x2)) = (
            calendar.x_for_ordinal(prev_ordinal, viewport_width),
            calendar.x_for_ordinal(cur_ordinal, viewport_width),
        ) else {
            continue;
        };
        let (Some(y1), Some(y2)) = (
            price_mapper.price_to_y(prev.price),
            price_mapper.price_to_y(cur.price),
        ) else {
            continue;
        };

        segments.push(LineSegment {
            x1,
            y1,
            x2,
            y2,
            rising: cur.price >= closing_price,
        });
    }

    segments
}

/// Builds the volume histogram for the visible bar slice.
#[must_use]
pub fn volume_bars_for_bars(
    bars: &[BarPoint],
    index_mapper: IndexMapper,
    lane_height: f64,
) -> Vec<VolumeBar> {
    let max_volume = bars.iter().fold(0.0_f64, |acc, bar| acc.max(bar.volume));
    if max_volume <= 0.0 || !lane_height.is_finite() || lane_height <= 0.0 {
        return Vec::new();
    }

    bars.iter()
        .enumerate()
        .map(|(index, bar)| {
            let prev_open = if index > 0 { bars[index - 1].open } else { bar.open };
            VolumeBar {
                x: index as f64 * index_mapper.unit_width(),
                width: index_mapper.unit_width(),
                height: bar.volume / max_volume * lane_height,
                rising: bar.open >= prev_open,
            }
        })
        .collect()
}

/// Builds the volume histogram for the intraday curve.
#[must_use]
pub fn volume_bars_for_points(
    points: &[TimePoint],
    calendar: &TradingCalendar,
    viewport_width: f64,
    lane_height: f64,
) -> Vec<VolumeBar> {
    let max_volume = points.iter().fold(0.0_f64, |acc, point| acc.max(point.volume));
    if max_volume <= 0.0 || !lane_height.is_finite() || lane_height <= 0.0 {
        return Vec::new();
    }
    let Some(unit_width) = calendar.unit_width(viewport_width) else {
        return Vec::new();
    };

    points
        .iter()
        .enumerate()
        .filter_map(|(index, point)| {
            let ordinal = calendar.ordinal_of_timestamp(point.timestamp)?;
            let prev_price = if index > 0 {
                points[index - 1].price
            } else {
                point.price
            };
            Some(VolumeBar {
                x: ordinal as f64 * unit_width,
                width: unit_width,
                height: point.volume / max_volume * lane_height,
                rising: point.price >= prev_price,
            })
        })
        .collect()
}

/// Places a high/low annotation next to its bar.
///
/// The marker extends rightward by default and flips to the left side when
/// the remaining width cannot fit line + label + margin.
#[must_use]
pub fn layout_extreme_marker(
    y: f64,
    anchor_x: f64,
    viewport_width: f64,
    text_width: f64,
    line_length: f64,
    margin: f64,
) -> ExtremeMarker {
    let flipped = viewport_width - anchor_x < line_length + text_width + margin;

    let (line_start_x, line_end_x) = if flipped {
        (anchor_x - line_length + 1.0, anchor_x + 1.0)
    } else {
        (anchor_x, anchor_x + line_length)
    };
    let text_x = if flipped {
        line_start_x - text_width / 2.0 - margin / 2.0
    } else {
        line_end_x + text_width / 2.0 + margin / 2.0
    };
    let circle_x = if flipped { line_start_x } else { line_end_x };

    ExtremeMarker {
        y,
        line_start_x,
        line_end_x,
        text_x,
        circle_x,
        flipped,
    }
}
