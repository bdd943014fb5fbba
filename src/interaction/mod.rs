use serde::{Deserialize, Serialize};

use crate::core::window::ZoomDirection;

/// Wheel delta interpretation differs per platform; macOS trackpads report
/// horizontal two-finger swipes through `delta_x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WheelPlatform {
    MacLike,
    #[default]
    Other,
}

/// Gesture class resolved from raw wheel deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WheelGestureKind {
    /// Dominant horizontal motion (two-finger swipe).
    PanLike,
    /// Dominant vertical motion (scroll / pinch fallback).
    ZoomLike,
}

/// Classified wheel gesture: both kinds drive the zoom transition, only the
/// direction rule differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelGesture {
    pub kind: WheelGestureKind,
    pub direction: ZoomDirection,
}

/// Classifies raw wheel deltas.
///
/// Preserved literally from the source behavior: `|delta_x| > |delta_y|` is
/// pan-like, anything else zoom-like; zoom-in is `delta_y < 0`, except that
/// pan-like gestures on Mac-like platforms read `delta_x < 0`. The
/// thresholds are platform folklore, not principle; do not "improve" them.
#[must_use]
pub fn classify_wheel(delta_x: f64, delta_y: f64, platform: WheelPlatform) -> WheelGesture {
    let kind = if delta_x.abs() > delta_y.abs() {
        WheelGestureKind::PanLike
    } else {
        WheelGestureKind::ZoomLike
    };

    let zoom_in = match kind {
        WheelGestureKind::PanLike => match platform {
            WheelPlatform::MacLike => delta_x < 0.0,
            WheelPlatform::Other => delta_y < 0.0,
        },
        WheelGestureKind::ZoomLike => delta_y < 0.0,
    };

    WheelGesture {
        kind,
        direction: if zoom_in {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        },
    }
}

/// Per-frame wheel coalescing.
///
/// High-frequency wheel events merge into one pending delta pair; the host
/// flushes at most once per animation frame, so a burst of events costs one
/// recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelAccumulator {
    pending: Option<(f64, f64)>,
}

impl WheelAccumulator {
    /// Merges a wheel event; returns `true` when a flush should be scheduled
    /// (that is, this event opened a fresh batch).
    pub fn accumulate(&mut self, delta_x: f64, delta_y: f64) -> bool {
        match &mut self.pending {
            Some((x, y)) => {
                *x += delta_x;
                *y += delta_y;
                false
            }
            None => {
                self.pending = Some((delta_x, delta_y));
                true
            }
        }
    }

    /// Takes the merged deltas for this frame, resetting the batch.
    pub fn take(&mut self) -> Option<(f64, f64)> {
        self.pending.take()
    }
}

/// Pointer-driven inspection state.
///
/// Recomputed wholesale per pointer move and cleared on leave; the empty
/// label means the pointer Y could not be mapped to a price.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CrosshairState {
    pub visible: bool,
    pub pixel_x: f64,
    pub pixel_y: f64,
    pub data_index: usize,
    pub price_label: String,
}

/// Snapped focus dot on the intraday curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusPoint {
    pub x: f64,
    pub y: f64,
}

/// Active drag-pan bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    pub dragging: bool,
    pub last_x: f64,
}

impl DragState {
    pub fn start(&mut self, x: f64) {
        self.dragging = true;
        self.last_x = x;
    }

    pub fn stop(&mut self) {
        self.dragging = false;
    }

    /// Advances the drag origin and returns the pixel delta since last move.
    pub fn advance(&mut self, x: f64) -> f64 {
        let delta = x - self.last_x;
        self.last_x = x;
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::{WheelAccumulator, WheelGestureKind, WheelPlatform, classify_wheel};
    use crate::core::window::ZoomDirection;

    #[test]
    fn vertical_scroll_up_zooms_in() {
        let gesture = classify_wheel(0.0, -10.0, WheelPlatform::Other);
        assert_eq!(gesture.kind, WheelGestureKind::ZoomLike);
        assert_eq!(gesture.direction, ZoomDirection::In);
    }

    #[test]
    fn horizontal_swipe_reads_delta_x_on_mac_only() {
        let mac = classify_wheel(-12.0, 2.0, WheelPlatform::MacLike);
        assert_eq!(mac.kind, WheelGestureKind::PanLike);
        assert_eq!(mac.direction, ZoomDirection::In);

        let other = classify_wheel(-12.0, 2.0, WheelPlatform::Other);
        assert_eq!(other.kind, WheelGestureKind::PanLike);
        assert_eq!(other.direction, ZoomDirection::Out);
    }

    #[test]
    fn equal_deltas_fall_through_to_zoom() {
        let gesture = classify_wheel(5.0, 5.0, WheelPlatform::Other);
        assert_eq!(gesture.kind, WheelGestureKind::ZoomLike);
    }

    #[test]
    fn accumulator_batches_until_taken() {
        let mut accumulator = WheelAccumulator::default();
        assert!(accumulator.accumulate(1.0, -2.0));
        assert!(!accumulator.accumulate(3.0, -4.0));
        assert_eq!(accumulator.take(), Some((4.0, -6.0)));
        assert_eq!(accumulator.take(), None);
        assert!(accumulator.accumulate(1.0, 1.0));
    }
}
