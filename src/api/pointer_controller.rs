use tracing::trace;

use crate::core::format::fixed2;
use crate::history::HistoryProvider;
use crate::interaction::{CrosshairState, FocusPoint};

use super::ChartEngine;
use super::engine_config::ChartMode;

impl<H: HistoryProvider> ChartEngine<H> {
    /// Starts a drag-pan gesture (bar charts only).
    pub fn pointer_down(&mut self, x: f64) {
        if self.config.mode == ChartMode::Kline {
            self.drag.start(x);
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag.stop();
    }

    /// Clears the crosshair, tooltip anchor and any active drag.
    pub fn pointer_leave(&mut self) {
        self.drag.stop();
        self.clear_inspection();
    }

    /// Recomputes inspection state for a pointer position, or pans while a
    /// drag is active. All work happens synchronously in this callback.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        match self.config.mode {
            ChartMode::Kline => self.pointer_move_kline(x, y),
            ChartMode::Intraday => self.pointer_move_intraday(x, y),
        }
    }

    fn pointer_move_kline(&mut self, x: f64, y: f64) {
        if self.bars.is_empty() {
            return;
        }

        if self.drag.dragging {
            // Panning hides inspection; the crosshair returns on the next
            // non-drag move.
            self.clear_inspection();
            let delta = self.drag.advance(x);
            let Some(mapper) = self.index_mapper() else {
                return;
            };

            let moved =
                self.window
                    .pan_by_pixels(delta, mapper.unit_width(), self.config.drag_speed);
            if moved {
                trace!(
                    start = self.window.start_index(),
                    end = self.window.end_index(),
                    "drag pan"
                );
            }
            if self.window.at_left_edge() {
                self.maybe_request_older_history();
            }
            return;
        }

        let visible_len = self.window.visible_count();
        let Some(mapper) = self.index_mapper() else {
            return;
        };
        let Some(visible_index) = mapper.index_at_x(x, visible_len) else {
            return;
        };

        let data_index = self.window.start_index() + visible_index;
        let price_label = self.price_label_for_y(y);
        self.crosshair = CrosshairState {
            visible: true,
            pixel_x: mapper.center_x(visible_index),
            pixel_y: y,
            data_index,
            price_label,
        };
        self.recompute_ma_row(data_index);
    }

    fn pointer_move_intraday(&mut self, x: f64, y: f64) {
        if self.points.is_empty() || x < 0.0 {
            return;
        }

        let width = f64::from(self.config.viewport.width);
        let Some(mut ordinal) = self.calendar.ordinal_at_x(x, width) else {
            return;
        };

        // The crosshair never runs past the latest loaded sample; beyond it
        // the anchor pins to the last in-session minute.
        let last = self.points[self.points.len() - 1];
        let Some(last_ordinal) = self.calendar.ordinal_of_timestamp(last.timestamp) else {
            return;
        };
        ordinal = ordinal.min(last_ordinal);

        let Some(fixed_x) = self.calendar.x_for_ordinal(ordinal, width) else {
            return;
        };

        let Some(data_index) = self.points.iter().position(|point| {
            self.calendar.ordinal_of_timestamp(point.timestamp) == Some(ordinal)
        }) else {
            return;
        };
        let data_index = data_index.min(self.points.len() - 1);

        let point = self.points[data_index];
        self.focus = self
            .price_mapper_for_pass()
            .and_then(|mapper| mapper.price_to_y(point.price))
            .map(|focus_y| FocusPoint {
                x: x.min(fixed_x),
                y: focus_y,
            });

        let price_label = self.price_label_for_y(y);
        self.crosshair = CrosshairState {
            visible: true,
            pixel_x: fixed_x,
            pixel_y: y,
            data_index,
            price_label,
        };
    }

    /// Back-computes the price under a pointer Y, or an empty label when the
    /// plot has no usable mapping.
    #[must_use]
    pub fn price_label_for_y(&self, y: f64) -> String {
        self.price_mapper_for_pass()
            .map(|mapper| fixed2(mapper.y_to_price(y)))
            .unwrap_or_default()
    }
}
