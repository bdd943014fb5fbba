use serde::{Deserialize, Serialize};

use crate::core::axis::{PriceAxisLabels, price_axis_labels};
use crate::core::coords::PriceMapper;
use crate::core::format::fixed2;
use crate::core::geometry::{
    CandleGeometry, EXTREME_LINE_LENGTH_PX, EXTREME_TEXT_MARGIN_PX, ExtremeMarker, LineSegment,
    VolumeBar, layout_extreme_marker, polyline_points, polyline_segments, project_candles,
    volume_bars_for_bars, volume_bars_for_points,
};
use crate::core::range::{
    OhlcExtremes, PriceRange, XAxisLabel, downsample_x_labels, ohlc_extremes, price_range_of_bars,
    price_range_of_points,
};
use crate::history::HistoryProvider;
use crate::text::TextMetrics;

use super::ChartEngine;
use super::engine_config::ChartMode;

/// Everything one render pass needs, derived in a single pure sweep of the
/// visible slice. Hosts draw it and throw it away; nothing here survives
/// into the next pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartFrame {
    pub price_range: Option<PriceRange>,
    pub labels: PriceAxisLabels,
    pub x_labels: Vec<XAxisLabel>,
    pub candles: Vec<CandleGeometry>,
    pub curve_points: Vec<(f64, f64)>,
    pub curve_segments: Vec<LineSegment>,
    pub volume: Vec<VolumeBar>,
    pub extremes: Option<OhlcExtremes>,
    pub high_marker: Option<ExtremeMarker>,
    pub low_marker: Option<ExtremeMarker>,
    pub reference_line_y: Option<f64>,
}

impl<H: HistoryProvider> ChartEngine<H> {
    /// Derives the axis labels for the current pass.
    #[must_use]
    pub fn axis_labels(&self) -> PriceAxisLabels {
        match self.active_price_range() {
            Some(range) => price_axis_labels(
                self.config.price_line_count,
                range,
                self.config.reference_price,
                self.config.effective_closing_price(),
            ),
            None => PriceAxisLabels::default(),
        }
    }

    /// Assembles the full frame for the current mode and window.
    #[must_use]
    pub fn build_frame(&self, metrics: &dyn TextMetrics) -> ChartFrame {
        match self.config.mode {
            ChartMode::Kline => self.build_kline_frame(metrics),
            ChartMode::Intraday => self.build_intraday_frame(),
        }
    }

    fn build_kline_frame(&self, metrics: &dyn TextMetrics) -> ChartFrame {
        let visible = self.visible_bars();
        let Some(range) = price_range_of_bars(visible) else {
            return ChartFrame::default();
        };

        let labels = price_axis_labels(
            self.config.price_line_count,
            range,
            self.config.reference_price,
            self.config.effective_closing_price(),
        );
        let x_labels = downsample_x_labels(visible, self.config.time_tick_count);

        let price_mapper = PriceMapper::from_labels(&labels, self.config.plot_height());
        let index_mapper = self.index_mapper();
        let (Some(price_mapper), Some(index_mapper)) = (price_mapper, index_mapper) else {
            return ChartFrame {
                price_range: Some(range),
                labels,
                x_labels,
                ..ChartFrame::default()
            };
        };

        let extremes = ohlc_extremes(visible);
        let viewport_width = f64::from(self.config.viewport.width);
        let marker_for = |price: f64, index: usize| {
            let y = price_mapper.price_to_y(price)?;
            let text = metrics.measure(
                &fixed2(price),
                self.config.font_size,
                &self.config.font_family,
            );
            Some(layout_extreme_marker(
                y,
                index_mapper.center_x(index),
                viewport_width,
                text.width,
                EXTREME_LINE_LENGTH_PX,
                EXTREME_TEXT_MARGIN_PX,
            ))
        };

        ChartFrame {
            price_range: Some(range),
            x_labels,
            candles: project_candles(visible, price_mapper, index_mapper),
            volume: if self.config.show_volume {
                volume_bars_for_bars(visible, index_mapper, self.config.volume_lane_height)
            } else {
                Vec::new()
            },
            high_marker: extremes.and_then(|e| marker_for(e.high, e.high_index)),
            low_marker: extremes.and_then(|e| marker_for(e.low, e.low_index)),
            extremes,
            reference_line_y: self
                .config
                .reference_price
                .and_then(|price| price_mapper.price_to_y(price)),
            labels,
            ..ChartFrame::default()
        }
    }

    fn build_intraday_frame(&self) -> ChartFrame {
        let Some(range) = price_range_of_points(&self.points) else {
            return ChartFrame::default();
        };

        let labels = price_axis_labels(
            self.config.price_line_count,
            range,
            self.config.reference_price,
            self.config.effective_closing_price(),
        );
        let Some(price_mapper) = PriceMapper::from_labels(&labels, self.config.plot_height())
        else {
            return ChartFrame {
                price_range: Some(range),
                labels,
                ..ChartFrame::default()
            };
        };

        let viewport_width = f64::from(self.config.viewport.width);
        // With no closing price the curve is one uniform polyline; with one,
        // every segment carries its own rise/fall classification.
        let (curve_points, curve_segments) = match self.config.effective_closing_price() {
            Some(closing) => (
                Vec::new(),
                polyline_segments(
                    &self.points,
                    &self.calendar,
                    price_mapper,
                    viewport_width,
                    closing,
                ),
            ),
            None => (
                polyline_points(&self.points, &self.calendar, price_mapper, viewport_width),
                Vec::new(),
            ),
        };

        ChartFrame {
            price_range: Some(range),
            curve_points,
            curve_segments,
            volume: if self.config.show_volume {
                volume_bars_for_points(
                    &self.points,
                    &self.calendar,
                    viewport_width,
                    self.config.volume_lane_height,
                )
            } else {
                Vec::new()
            },
            reference_line_y: self
                .config
                .reference_price
                .and_then(|price| price_mapper.price_to_y(price)),
            labels,
            ..ChartFrame::default()
        }
    }

    pub(super) fn active_price_range(&self) -> Option<PriceRange> {
        match self.config.mode {
            ChartMode::Kline => price_range_of_bars(self.visible_bars()),
            ChartMode::Intraday => price_range_of_points(&self.points),
        }
    }

    pub(super) fn price_mapper_for_pass(&self) -> Option<PriceMapper> {
        let labels = self.axis_labels();
        PriceMapper::from_labels(&labels, self.config.plot_height())
    }
}
