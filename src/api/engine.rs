use serde::{Deserialize, Serialize};

use crate::core::coords::IndexMapper;
use crate::core::moving_average::{MA_EMPTY, moving_average};
use crate::core::{BarPoint, TimePoint, TradingCalendar, ViewportWindow};
use crate::error::ChartResult;
use crate::history::HistoryProvider;
use crate::interaction::{CrosshairState, DragState, FocusPoint, WheelAccumulator};

use super::engine_config::{ChartEngineConfig, ChartMode};

/// One formatted moving-average cell (`MA5 12.34`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaValue {
    pub period: usize,
    pub value: String,
}

/// Interactive chart instance owned by the hosting session.
///
/// The engine holds the mutable viewport/crosshair state and hands it into
/// pure computation passes; every derived artifact (ranges, labels,
/// geometry) is recomputed from scratch per pass, never diffed.
pub struct ChartEngine<H: HistoryProvider> {
    pub(super) config: ChartEngineConfig,
    pub(super) calendar: TradingCalendar,
    pub(super) history: H,
    pub(super) points: Vec<TimePoint>,
    pub(super) bars: Vec<BarPoint>,
    pub(super) window: ViewportWindow,
    pub(super) crosshair: CrosshairState,
    pub(super) focus: Option<FocusPoint>,
    pub(super) ma_values: Vec<MaValue>,
    pub(super) wheel: WheelAccumulator,
    pub(super) drag: DragState,
    pub(super) history_in_flight: bool,
}

impl<H: HistoryProvider> ChartEngine<H> {
    pub fn new(history: H, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;
        let calendar = TradingCalendar::from_sessions(&config.trade_sessions)?;
        let ma_values = sentinel_ma_row(&config.ma_periods);
        let window = ViewportWindow::new(0, config.default_visible_count);

        Ok(Self {
            config,
            calendar,
            history,
            points: Vec::new(),
            bars: Vec::new(),
            window,
            crosshair: CrosshairState::default(),
            focus: None,
            ma_values,
            wheel: WheelAccumulator::default(),
            drag: DragState::default(),
            history_in_flight: false,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn mode(&self) -> ChartMode {
        self.config.mode
    }

    pub fn set_mode(&mut self, mode: ChartMode) {
        self.config.mode = mode;
        self.clear_inspection();
    }

    #[must_use]
    pub fn calendar(&self) -> &TradingCalendar {
        &self.calendar
    }

    #[must_use]
    pub fn window(&self) -> ViewportWindow {
        self.window
    }

    #[must_use]
    pub fn crosshair_state(&self) -> &CrosshairState {
        &self.crosshair
    }

    #[must_use]
    pub fn focus_point(&self) -> Option<FocusPoint> {
        self.focus
    }

    #[must_use]
    pub fn ma_values(&self) -> &[MaValue] {
        &self.ma_values
    }

    #[must_use]
    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    #[must_use]
    pub fn bars(&self) -> &[BarPoint] {
        &self.bars
    }

    #[must_use]
    pub fn visible_bars(&self) -> &[BarPoint] {
        self.window.visible_slice(&self.bars)
    }

    #[must_use]
    pub fn history_in_flight(&self) -> bool {
        self.history_in_flight
    }

    /// Index mapper over the current visible window.
    #[must_use]
    pub fn index_mapper(&self) -> Option<IndexMapper> {
        IndexMapper::new(
            f64::from(self.config.viewport.width),
            self.window.visible_count(),
            self.config.bar_fill_ratio,
        )
    }

    /// Recomputes the moving-average row for a bar anchor.
    ///
    /// The anchor is an index into the full series, so crosshair-selected
    /// historical bars get their own averages, not the latest bar's.
    pub(super) fn recompute_ma_row(&mut self, anchor: usize) {
        let closes: Vec<f64> = self.bars.iter().map(|bar| bar.close).collect();
        self.ma_values = self
            .config
            .ma_periods
            .iter()
            .map(|period| MaValue {
                period: *period,
                value: moving_average(&closes, anchor, *period),
            })
            .collect();
    }

    pub(super) fn reset_ma_row(&mut self) {
        self.ma_values = sentinel_ma_row(&self.config.ma_periods);
    }

    pub(super) fn clear_inspection(&mut self) {
        self.crosshair = CrosshairState::default();
        self.focus = None;
    }
}

fn sentinel_ma_row(periods: &[usize]) -> Vec<MaValue> {
    periods
        .iter()
        .map(|period| MaValue {
            period: *period,
            value: MA_EMPTY.to_owned(),
        })
        .collect()
}
