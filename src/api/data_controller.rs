use tracing::{debug, trace, warn};

use crate::core::{BarPoint, TimePoint, ViewportWindow};
use crate::history::{HistoryFetch, HistoryProvider};

use super::ChartEngine;

impl<H: HistoryProvider> ChartEngine<H> {
    /// Replaces the intraday point series.
    pub fn set_points(&mut self, points: Vec<TimePoint>) {
        debug!(count = points.len(), "set intraday points");
        self.points = points;
        self.clear_inspection();
    }

    /// Appends one intraday sample at the tail.
    pub fn append_point(&mut self, point: TimePoint) {
        self.points.push(point);
        trace!(count = self.points.len(), "append intraday point");
    }

    /// Replaces the bar series and re-initializes the viewport window over
    /// the whole history.
    pub fn set_bars(&mut self, bars: Vec<BarPoint>) {
        debug!(count = bars.len(), "set bars");
        self.window = ViewportWindow::new(bars.len(), self.config.default_visible_count);
        self.bars = bars;
        self.clear_inspection();
        if self.bars.is_empty() {
            self.reset_ma_row();
        } else {
            self.recompute_ma_row(self.bars.len() - 1);
        }
    }

    /// Appends one bar at the tail; the window keeps its indices.
    pub fn append_bar(&mut self, bar: BarPoint) {
        self.bars.push(bar);
        self.window.extend_tail(1);
        trace!(count = self.bars.len(), "append bar");
    }

    /// Requests older history once the window rests on the left edge.
    ///
    /// A single in-flight guard serializes requests: while one is
    /// outstanding nothing new is issued, and the guard releases exactly
    /// once per request — immediately for inline answers, or through
    /// [`Self::fulfill_pending_history`] for deferred ones.
    pub(super) fn maybe_request_older_history(&mut self) {
        if self.history_in_flight {
            return;
        }
        if !self.window.at_left_edge() || self.bars.is_empty() {
            return;
        }

        self.history_in_flight = true;
        let oldest = self.bars.first().map(|bar| bar.timestamp);
        let count_hint = self.window.visible_count().max(1);
        debug!(?oldest, count_hint, "requesting older history");

        match self.history.fetch_older(oldest, count_hint) {
            HistoryFetch::Ready(older) => {
                self.finish_history_fetch(older);
            }
            HistoryFetch::Exhausted => {
                debug!("history exhausted");
                self.history_in_flight = false;
            }
            HistoryFetch::Pending => {
                trace!("history fetch pending");
            }
        }
    }

    /// Completes a deferred history fetch.
    ///
    /// Empty batches release the guard with no state change. Batches
    /// arriving with no request outstanding are ignored; the provider
    /// answered a request this engine no longer tracks.
    pub fn fulfill_pending_history(&mut self, older: Vec<BarPoint>) {
        if !self.history_in_flight {
            warn!(
                count = older.len(),
                "dropping history batch with no request in flight"
            );
            return;
        }

        self.finish_history_fetch(older);
    }

    fn finish_history_fetch(&mut self, older: Vec<BarPoint>) {
        if older.is_empty() {
            debug!("history fetch returned no bars");
            self.history_in_flight = false;
            return;
        }

        let added = older.len();
        let mut merged = older;
        merged.append(&mut self.bars);
        self.bars = merged;
        self.window.prepend(added);
        self.history_in_flight = false;
        debug!(
            added,
            total = self.bars.len(),
            start = self.window.start_index(),
            end = self.window.end_index(),
            "prepended older history"
        );
    }
}
