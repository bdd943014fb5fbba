//! Backward lazy-loading seam.
//!
//! Older bars arrive through an injected provider. The engine issues at most
//! one outstanding request; the in-flight guard is released exactly once per
//! request, whether the provider answers inline or defers to the host's own
//! async machinery (see [`crate::api::ChartEngine::fulfill_pending_history`]).

use crate::core::BarPoint;

/// Provider answer for one older-history request.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryFetch {
    /// Older bars, ordered ascending, ready to prepend now.
    Ready(Vec<BarPoint>),
    /// The provider started an async fetch; the host fulfills it later.
    Pending,
    /// No more history exists before the given point.
    Exhausted,
}

/// Injected fetch collaborator for history older than the current head.
pub trait HistoryProvider {
    /// Requests bars strictly older than `oldest_timestamp` (epoch ms).
    ///
    /// `count_hint` is the window span the engine would like to receive;
    /// providers may return more or fewer.
    fn fetch_older(&mut self, oldest_timestamp: Option<i64>, count_hint: usize) -> HistoryFetch;
}

/// Provider for charts with fully loaded history.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHistoryProvider;

impl HistoryProvider for NullHistoryProvider {
    fn fetch_older(&mut self, _oldest_timestamp: Option<i64>, _count_hint: usize) -> HistoryFetch {
        HistoryFetch::Exhausted
    }
}
