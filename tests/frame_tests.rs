use timek_rs::api::{ChartEngineConfig, ChartMode};
use timek_rs::core::{BarPoint, TimePoint, Viewport};
use timek_rs::history::NullHistoryProvider;
use timek_rs::text::MonospaceTextMetrics;
use timek_rs::ChartEngine;

const SESSION_OPEN_MS: i64 = 1_704_187_800_000; // 09:30

fn kline_engine() -> ChartEngine<NullHistoryProvider> {
    let config = ChartEngineConfig::new(Viewport::new(1000, 470))
        .with_closing_price(25.0)
        .with_reference_price(70.0)
        .with_zoom_step(5.0);
    let mut engine = ChartEngine::new(NullHistoryProvider, config).expect("engine init");

    let bars: Vec<BarPoint> = (0..40)
        .map(|i| {
            let close = 20.0 + i as f64;
            BarPoint::new(
                SESSION_OPEN_MS + i as i64 * 86_400_000,
                close - 0.5,
                close + 1.0,
                close - 1.0,
                close,
                100.0 + i as f64,
                1_000.0,
            )
        })
        .collect();
    engine.set_bars(bars);
    engine
}

#[test]
fn kline_frame_projects_every_visible_bar() {
    let engine = kline_engine();
    let frame = engine.build_frame(&MonospaceTextMetrics::default());

    assert_eq!(frame.candles.len(), 40);
    assert_eq!(frame.volume.len(), 40);
    assert_eq!(frame.labels.values.len(), 4);
    assert!(frame.curve_points.is_empty());
    assert!(frame.curve_segments.is_empty());

    // Reference price 70 lies above every bar, so the axis widened for it
    // and the marker line maps inside the plot.
    assert!(frame.labels.adjusted_max >= 70.0);
    assert!(frame.reference_line_y.is_some());
}

#[test]
fn kline_frame_annotates_both_extremes() {
    let engine = kline_engine();
    let frame = engine.build_frame(&MonospaceTextMetrics::default());

    let extremes = frame.extremes.expect("extremes");
    assert_eq!(extremes.high, 60.0);
    assert_eq!(extremes.high_index, 39);
    assert_eq!(extremes.low, 19.0);
    assert_eq!(extremes.low_index, 0);

    let high_marker = frame.high_marker.expect("high marker");
    // The highest bar sits at the right edge, so its label flips left.
    assert!(high_marker.flipped);
    let low_marker = frame.low_marker.expect("low marker");
    assert!(!low_marker.flipped);
}

#[test]
fn kline_x_labels_downsample_with_forced_tail() {
    let engine = kline_engine();
    let frame = engine.build_frame(&MonospaceTextMetrics::default());

    // stride = floor(40 / 3) = 13 → indices 0, 13, 26, 39.
    let indices: Vec<usize> = frame.x_labels.iter().map(|label| label.index).collect();
    assert_eq!(indices, vec![0, 13, 26, 39]);
    assert_eq!(frame.x_labels[0].label, "2024-01-02");
}

#[test]
fn intraday_frame_classifies_segments_against_the_close() {
    let config = ChartEngineConfig::new(Viewport::new(968, 470))
        .with_mode(ChartMode::Intraday)
        .with_closing_price(10.5);
    let mut engine = ChartEngine::new(NullHistoryProvider, config).expect("engine init");

    let points: Vec<TimePoint> = (0..10)
        .map(|i| TimePoint::new(SESSION_OPEN_MS + i * 60_000, 10.0 + i as f64 * 0.1, 50.0, 500.0))
        .collect();
    engine.set_points(points);

    let frame = engine.build_frame(&MonospaceTextMetrics::default());
    assert!(frame.curve_points.is_empty());
    assert_eq!(frame.curve_segments.len(), 9);
    // Prices cross 10.5 at sample index 5.
    assert!(!frame.curve_segments[0].rising);
    assert!(frame.curve_segments[8].rising);
    assert_eq!(frame.volume.len(), 10);
}

#[test]
fn intraday_frame_without_close_uses_one_polyline() {
    let config = ChartEngineConfig::new(Viewport::new(968, 470)).with_mode(ChartMode::Intraday);
    let mut engine = ChartEngine::new(NullHistoryProvider, config).expect("engine init");

    let points: Vec<TimePoint> = (0..10)
        .map(|i| TimePoint::new(SESSION_OPEN_MS + i * 60_000, 10.0 + i as f64 * 0.1, 50.0, 500.0))
        .collect();
    engine.set_points(points);

    let frame = engine.build_frame(&MonospaceTextMetrics::default());
    assert_eq!(frame.curve_points.len(), 10);
    assert!(frame.curve_segments.is_empty());
}

#[test]
fn empty_engine_builds_an_empty_frame() {
    let config = ChartEngineConfig::new(Viewport::new(1000, 470));
    let engine = ChartEngine::new(NullHistoryProvider, config).expect("engine init");

    let frame = engine.build_frame(&MonospaceTextMetrics::default());
    assert!(frame.price_range.is_none());
    assert!(frame.labels.is_empty());
    assert!(frame.candles.is_empty());
    assert!(frame.x_labels.is_empty());
}

#[test]
fn zoom_shrinks_the_projected_slice() {
    let mut engine = kline_engine();
    assert!(engine.on_wheel(0.0, -10.0));
    engine.flush_wheel();

    // 40 → 35 visible bars, right edge pinned.
    let frame = engine.build_frame(&MonospaceTextMetrics::default());
    assert_eq!(frame.candles.len(), 35);
    let window = engine.window();
    assert_eq!(window.start_index(), 5);
    assert_eq!(window.end_index(), 40);
}
