use chrono::DateTime;
use serde::Serialize;

use crate::core::BarPoint;
use crate::core::format::{amplitude_percent, fixed2, format_compact, signed_fixed2};
use crate::history::HistoryProvider;

use super::ChartEngine;
use super::engine_config::{ChartMode, RiseFallPalette};

/// Direction classification a host binds to its rise/fall/flat colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Rise,
    Fall,
    Flat,
}

impl Trend {
    #[must_use]
    pub fn of_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Self::Rise
        } else if delta < 0.0 {
            Self::Fall
        } else {
            Self::Flat
        }
    }

    /// Resolves the configured color binding for this trend.
    #[must_use]
    pub fn color<'a>(self, palette: &'a RiseFallPalette) -> &'a str {
        match self {
            Self::Rise => &palette.rise,
            Self::Fall => &palette.fall,
            Self::Flat => &palette.flat,
        }
    }
}

/// One ordered tooltip line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipRow {
    pub label: &'static str,
    pub value: String,
    pub trend: Option<Trend>,
}

impl TooltipRow {
    fn plain(label: &'static str, value: String) -> Self {
        Self {
            label,
            value,
            trend: None,
        }
    }

    fn trended(label: &'static str, value: String, delta: f64) -> Self {
        Self {
            label,
            value,
            trend: Some(Trend::of_delta(delta)),
        }
    }
}

impl<H: HistoryProvider> ChartEngine<H> {
    /// Builds the tooltip payload for the crosshair-selected point.
    ///
    /// Pure function of the current crosshair; returns no rows while the
    /// crosshair is hidden or resolves outside the series.
    #[must_use]
    pub fn tooltip_rows(&self) -> Vec<TooltipRow> {
        if !self.crosshair.visible {
            return Vec::new();
        }

        match self.config.mode {
            ChartMode::Kline => self
                .bars
                .get(self.crosshair.data_index)
                .map(|bar| self.bar_rows(*bar))
                .unwrap_or_default(),
            ChartMode::Intraday => self
                .points
                .get(self.crosshair.data_index)
                .map(|point| {
                    let mut rows = vec![
                        TooltipRow::plain("time", minute_label(point.timestamp)),
                        TooltipRow::plain("price", format_compact(point.price)),
                    ];

                    if let Some(closing) = self.config.effective_closing_price() {
                        let change = point.price - closing;
                        rows.push(TooltipRow::trended("change", signed_fixed2(change), change));
                        if let Some(amplitude) = amplitude_percent(point.price, closing) {
                            rows.push(TooltipRow::trended("change %", amplitude, change));
                        }
                    }

                    rows.push(TooltipRow::plain("volume", format_compact(point.volume)));
                    rows.push(TooltipRow::plain("turnover", format_compact(point.turnover)));
                    rows
                })
                .unwrap_or_default(),
        }
    }

    fn bar_rows(&self, bar: BarPoint) -> Vec<TooltipRow> {
        let mut rows = vec![
            TooltipRow::plain("time", minute_label(bar.timestamp)),
            TooltipRow::plain("open", format_compact(bar.open)),
            TooltipRow::plain("close", format_compact(bar.close)),
            TooltipRow::plain("high", format_compact(bar.high)),
            TooltipRow::plain("low", format_compact(bar.low)),
        ];

        // Change rows appear only when a prior close is configured, but the
        // bar's own move is measured against its open.
        if self.config.effective_closing_price().is_some() {
            let change = bar.close - bar.open;
            rows.push(TooltipRow::trended("change", signed_fixed2(change), change));
            if let Some(amplitude) = amplitude_percent(bar.close, bar.open) {
                rows.push(TooltipRow::trended("change %", amplitude, change));
            }
        }

        rows.push(TooltipRow::plain("volume", format_compact(bar.volume)));
        rows.push(TooltipRow::plain("turnover", format_compact(bar.turnover)));

        if let Some(float_share) = bar.float_share.filter(|share| *share > 0.0) {
            let rate = bar.volume / float_share * 100.0;
            rows.push(TooltipRow::plain(
                "turnover rate",
                format!("{}%", signed_fixed2(rate)),
            ));
        }

        rows
    }

    /// Palette binding for a tooltip row, cosmetic only.
    #[must_use]
    pub fn row_color<'a>(&'a self, row: &TooltipRow) -> Option<&'a str> {
        row.trend.map(|trend| trend.color(&self.config.palette))
    }
}

fn minute_label(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|time| time.format("%m-%d %H:%M").to_string())
        .unwrap_or_default()
}
