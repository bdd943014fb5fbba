use serde::{Deserialize, Serialize};

/// Zoom direction resolved from a wheel gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Contiguous sub-range of the full bar history currently rendered.
///
/// Invariant: `0 <= start_index <= end_index <= total_count`. The window is
/// created over the whole series when data first arrives and is then mutated
/// only by zoom, pan and history-prepend transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportWindow {
    start_index: usize,
    end_index: usize,
    window_count: usize,
    total_count: usize,
}

impl ViewportWindow {
    /// Creates a window spanning the whole series.
    #[must_use]
    pub fn new(total_count: usize, window_count: usize) -> Self {
        Self {
            start_index: 0,
            end_index: total_count,
            window_count,
            total_count,
        }
    }

    #[must_use]
    pub fn start_index(self) -> usize {
        self.start_index
    }

    #[must_use]
    pub fn end_index(self) -> usize {
        self.end_index
    }

    /// Configured preferred span; informational, transitions do not read it.
    #[must_use]
    pub fn window_count(self) -> usize {
        self.window_count
    }

    #[must_use]
    pub fn total_count(self) -> usize {
        self.total_count
    }

    #[must_use]
    pub fn visible_count(self) -> usize {
        self.end_index - self.start_index
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.total_count == 0
    }

    #[must_use]
    pub fn at_left_edge(self) -> bool {
        self.start_index == 0
    }

    /// Borrows the visible slice out of the full series.
    #[must_use]
    pub fn visible_slice<'a, T>(self, data: &'a [T]) -> &'a [T] {
        let end = self.end_index.min(data.len());
        let start = self.start_index.min(end);
        &data[start..end]
    }

    /// Zooms by `step` bars with the right edge pinned.
    ///
    /// Fractional steps floor on zoom-in and ceil on zoom-out so integer
    /// windows still move by at least one bar per tick. Returns whether the
    /// window changed.
    pub fn zoom(&mut self, direction: ZoomDirection, step: f64, min_visible_count: usize) -> bool {
        if self.total_count == 0 || !step.is_finite() || step <= 0.0 {
            return false;
        }

        let visible = self.visible_count() as f64;
        let target = match direction {
            ZoomDirection::In => (visible - step).floor(),
            ZoomDirection::Out => (visible + step).ceil(),
        };

        let floor = min_visible_count.min(self.total_count);
        let clamped = (target.max(0.0) as usize).clamp(floor, self.total_count);
        let new_start = self.end_index.saturating_sub(clamped);
        if new_start == self.start_index {
            return false;
        }

        self.start_index = new_start;
        true
    }

    /// Pans by a pointer pixel delta.
    ///
    /// `move_count = round(pixel_delta * drag_speed / unit_width)`; dragging
    /// right (positive delta) slides the window toward older data. Boundary
    /// hits shift the opposite edge so the span length is preserved. Returns
    /// whether the window changed.
    pub fn pan_by_pixels(&mut self, pixel_delta: f64, unit_width: f64, drag_speed: f64) -> bool {
        if self.total_count == 0 {
            return false;
        }
        if !pixel_delta.is_finite() || !drag_speed.is_finite() {
            return false;
        }
        if !unit_width.is_finite() || unit_width <= 0.0 {
            return false;
        }

        let move_count = (pixel_delta * drag_speed / unit_width).round() as i64;
        if move_count == 0 {
            return false;
        }

        let span = self.visible_count() as i64;
        let total = self.total_count as i64;
        let mut new_start = self.start_index as i64 - move_count;
        let mut new_end = self.end_index as i64 - move_count;

        if new_start < 0 {
            new_start = 0;
            new_end = span;
        }
        if new_end > total {
            new_end = total;
            new_start = total - span;
        }

        let (new_start, new_end) = (new_start as usize, new_end as usize);
        if new_start == self.start_index && new_end == self.end_index {
            return false;
        }

        self.start_index = new_start;
        self.end_index = new_end;
        true
    }

    /// Accounts for `count` older bars prepended to the series.
    ///
    /// Both edges shift right by the same amount, so the rendered window is
    /// visually unchanged.
    pub fn prepend(&mut self, count: usize) {
        self.start_index += count;
        self.end_index += count;
        self.total_count += count;
    }

    /// Accounts for `count` newer bars appended to the series tail.
    pub fn extend_tail(&mut self, count: usize) {
        self.total_count += count;
    }
}
