use tracing::trace;

use crate::history::HistoryProvider;
use crate::interaction::classify_wheel;

use super::ChartEngine;
use super::engine_config::ChartMode;

impl<H: HistoryProvider> ChartEngine<H> {
    /// Feeds one raw wheel event into the per-frame batch.
    ///
    /// Returns `true` when the host should schedule a [`Self::flush_wheel`]
    /// for the next animation frame; subsequent events merge into the open
    /// batch and return `false`.
    pub fn on_wheel(&mut self, delta_x: f64, delta_y: f64) -> bool {
        if self.config.mode != ChartMode::Kline {
            return false;
        }

        // Wheel motion dismisses inspection, mirroring pointer-leave.
        self.clear_inspection();
        self.wheel.accumulate(delta_x, delta_y)
    }

    /// Applies the merged wheel deltas batched since the last frame.
    pub fn flush_wheel(&mut self) {
        let Some((delta_x, delta_y)) = self.wheel.take() else {
            return;
        };
        if self.bars.is_empty() {
            return;
        }

        let gesture = classify_wheel(delta_x, delta_y, self.config.wheel_platform);
        let changed = self.window.zoom(
            gesture.direction,
            self.config.zoom_step,
            self.config.min_visible_count,
        );
        trace!(
            ?gesture,
            changed,
            start = self.window.start_index(),
            end = self.window.end_index(),
            "wheel zoom"
        );

        if self.window.at_left_edge() {
            self.maybe_request_older_history();
        }
    }
}
