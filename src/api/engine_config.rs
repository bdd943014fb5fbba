use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::core::calendar::DEFAULT_TRADE_SESSIONS;
use crate::error::{ChartError, ChartResult};
use crate::interaction::WheelPlatform;

/// Which of the two chart classes the engine currently serves.
///
/// The hosting shell owns the tab bar; switching a tab maps to `set_mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartMode {
    /// Continuous price/time curve over the trading calendar.
    Intraday,
    /// Discrete OHLC bar sequence with zoom/pan windowing.
    #[default]
    Kline,
}

/// Cosmetic color bindings handed back with tooltip rows and geometry; the
/// engine never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiseFallPalette {
    pub rise: String,
    pub fall: String,
    pub flat: String,
}

impl Default for RiseFallPalette {
    fn default() -> Self {
        Self {
            rise: "#f44336".to_owned(),
            fall: "#037B66".to_owned(),
            flat: "#888888".to_owned(),
        }
    }
}

/// Public engine bootstrap configuration.
///
/// One struct, one default-resolution pass: every knob the near-duplicate
/// source components re-derived ad hoc lives here with a serde default, so
/// host applications can persist/load chart setup without inventing their
/// own format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub mode: ChartMode,
    /// Smallest zoomable bar count.
    #[serde(default = "default_min_visible_count")]
    pub min_visible_count: usize,
    /// Preferred window span recorded on the viewport window.
    #[serde(default = "default_visible_count")]
    pub default_visible_count: usize,
    /// Bars added/removed per wheel tick; fractional steps accumulate.
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,
    /// Data points traversed per dragged pixel, scaled by unit width.
    #[serde(default = "default_drag_speed")]
    pub drag_speed: f64,
    /// Share of each unit cell the candle body fills.
    #[serde(default = "default_bar_fill_ratio")]
    pub bar_fill_ratio: f64,
    /// Price-axis tick count.
    #[serde(default = "default_price_line_count")]
    pub price_line_count: usize,
    /// Time-axis tick count for bar charts.
    #[serde(default = "default_time_tick_count")]
    pub time_tick_count: usize,
    /// Baseline marker guaranteed to land inside the axis range.
    #[serde(default)]
    pub reference_price: Option<f64>,
    /// Previous session close; drives amplitudes and rise/fall coloring.
    #[serde(default)]
    pub closing_price: Option<f64>,
    #[serde(default = "default_ma_periods")]
    pub ma_periods: Vec<usize>,
    #[serde(default)]
    pub wheel_platform: WheelPlatform,
    #[serde(default = "default_trade_sessions")]
    pub trade_sessions: Vec<String>,
    /// Height reserved under the plot for the time axis labels.
    #[serde(default = "default_axis_padding")]
    pub axis_padding: f64,
    #[serde(default = "default_volume_lane_height")]
    pub volume_lane_height: f64,
    #[serde(default = "default_show_volume")]
    pub show_volume: bool,
    #[serde(default)]
    pub palette: RiseFallPalette,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

impl ChartEngineConfig {
    /// Creates a config with every knob at its default.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            mode: ChartMode::default(),
            min_visible_count: default_min_visible_count(),
            default_visible_count: default_visible_count(),
            zoom_step: default_zoom_step(),
            drag_speed: default_drag_speed(),
            bar_fill_ratio: default_bar_fill_ratio(),
            price_line_count: default_price_line_count(),
            time_tick_count: default_time_tick_count(),
            reference_price: None,
            closing_price: None,
            ma_periods: default_ma_periods(),
            wheel_platform: WheelPlatform::default(),
            trade_sessions: default_trade_sessions(),
            axis_padding: default_axis_padding(),
            volume_lane_height: default_volume_lane_height(),
            show_volume: default_show_volume(),
            palette: RiseFallPalette::default(),
            font_size: default_font_size(),
            font_family: default_font_family(),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ChartMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_closing_price(mut self, closing_price: f64) -> Self {
        self.closing_price = Some(closing_price);
        self
    }

    #[must_use]
    pub fn with_reference_price(mut self, reference_price: f64) -> Self {
        self.reference_price = Some(reference_price);
        self
    }

    #[must_use]
    pub fn with_zoom_step(mut self, zoom_step: f64) -> Self {
        self.zoom_step = zoom_step;
        self
    }

    #[must_use]
    pub fn with_visible_counts(mut self, min_visible_count: usize, default_visible_count: usize) -> Self {
        self.min_visible_count = min_visible_count;
        self.default_visible_count = default_visible_count;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        if self.min_visible_count == 0 {
            return Err(ChartError::InvalidConfig(
                "min visible count must be > 0".to_owned(),
            ));
        }

        if !self.zoom_step.is_finite() || self.zoom_step <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "zoom step must be finite and > 0".to_owned(),
            ));
        }

        if !self.drag_speed.is_finite() || self.drag_speed <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "drag speed must be finite and > 0".to_owned(),
            ));
        }

        if !self.bar_fill_ratio.is_finite()
            || self.bar_fill_ratio <= 0.0
            || self.bar_fill_ratio > 1.0
        {
            return Err(ChartError::InvalidConfig(
                "bar fill ratio must be in (0, 1]".to_owned(),
            ));
        }

        if self.ma_periods.iter().any(|period| *period == 0) {
            return Err(ChartError::InvalidConfig(
                "moving-average periods must be > 0".to_owned(),
            ));
        }

        if !self.axis_padding.is_finite() || self.axis_padding < 0.0 {
            return Err(ChartError::InvalidConfig(
                "axis padding must be finite and >= 0".to_owned(),
            ));
        }

        if !self.volume_lane_height.is_finite() || self.volume_lane_height < 0.0 {
            return Err(ChartError::InvalidConfig(
                "volume lane height must be finite and >= 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Plot height after subtracting the axis strip and the volume lane.
    #[must_use]
    pub fn plot_height(&self) -> f64 {
        let mut height = f64::from(self.viewport.height) - self.axis_padding;
        if self.show_volume {
            height -= self.volume_lane_height;
        }
        height.max(0.0)
    }

    /// Closing price when configured and usable as a divisor.
    #[must_use]
    pub fn effective_closing_price(&self) -> Option<f64> {
        self.closing_price.filter(|price| *price > 0.0)
    }
}

fn default_min_visible_count() -> usize {
    25
}

fn default_visible_count() -> usize {
    30
}

fn default_zoom_step() -> f64 {
    0.5
}

fn default_drag_speed() -> f64 {
    0.5
}

fn default_bar_fill_ratio() -> f64 {
    0.8
}

fn default_price_line_count() -> usize {
    4
}

fn default_time_tick_count() -> usize {
    3
}

fn default_ma_periods() -> Vec<usize> {
    vec![5, 10, 20]
}

fn default_trade_sessions() -> Vec<String> {
    DEFAULT_TRADE_SESSIONS
        .iter()
        .map(|session| (*session).to_owned())
        .collect()
}

fn default_axis_padding() -> f64 {
    30.0
}

fn default_volume_lane_height() -> f64 {
    40.0
}

fn default_show_volume() -> bool {
    true
}

fn default_font_size() -> f64 {
    12.0
}

fn default_font_family() -> String {
    "Arial".to_owned()
}
