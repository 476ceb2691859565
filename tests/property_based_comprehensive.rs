//! Comprehensive property-based tests for the signal and aggregation core
//!
//! Core properties tested:
//! 1. Residency of an alternating series equals the sum of its pairs
//! 2. Sanitization is idempotent
//! 3. Binary correlation of a trace with itself and its complement
//! 4. Rectangle export round-trips through residency
//! 5. Small-gap filtering never adds events

use proptest::prelude::*;
use schedsig::aggregate::{binary_correlate, rects_to_series, residency_sum, trace_event};
use schedsig::signal::{filter_gaps_below, EventSeries, Window};

/// Alternating switch-in/switch-out series built from positive gaps
fn alternating_series() -> impl Strategy<Value = (EventSeries, Vec<(f64, f64)>)> {
    prop::collection::vec((1u32..1000, 1u32..1000), 1..20).prop_map(|gaps| {
        let mut time = 0.0;
        let mut pairs = Vec::new();
        let mut events = Vec::new();
        for (idle, run) in gaps {
            time += idle as f64 / 1000.0;
            let start = time;
            time += run as f64 / 1000.0;
            pairs.push((start, time));
            events.push((start, 1));
            events.push((time, -1));
        }
        (EventSeries::from_pairs(events), pairs)
    })
}

/// Arbitrary event series with non-decreasing timestamps
fn event_series() -> impl Strategy<Value = EventSeries> {
    prop::collection::vec((0u32..500, -1i32..=1), 0..40).prop_map(|steps| {
        let mut time = 0.0;
        steps
            .into_iter()
            .map(|(step, value)| {
                time += step as f64 / 10_000.0;
                (time, value)
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_residency_sum_matches_pairs((series, pairs) in alternating_series()) {
        let start = pairs.first().map(|p| p.0).unwrap_or(0.0);
        let stop = pairs.last().map(|p| p.1).unwrap_or(0.0);
        let window = Window::new(start, stop).unwrap();

        let expected: f64 = pairs.iter().map(|(i, o)| o - i).sum();
        let mut series = series;
        let total = residency_sum(&mut series, Some(window)).unwrap();

        prop_assert!((total - expected).abs() < 1e-9);
    }

    #[test]
    fn prop_sanitize_is_idempotent(series in event_series()) {
        let mut series = series;
        series.sanitize(None);
        let once = series.clone();
        series.sanitize(None);

        prop_assert_eq!(&series, &once);
        prop_assert!(series.is_sanitized());
    }

    #[test]
    fn prop_correlate_self_and_complement((series, _pairs) in alternating_series()) {
        let running = series.cumsum();

        prop_assert_eq!(binary_correlate(&running, &running).unwrap(), 1.0);
        prop_assert_eq!(binary_correlate(&running, &running.complement()).unwrap(), -1.0);
    }

    #[test]
    fn prop_rectangles_round_trip((series, _pairs) in alternating_series()) {
        let mut series = series;
        let rects = trace_event(&mut series, None).unwrap();
        let expected: f64 = rects.iter().map(|[start, stop]| stop - start).sum();

        let mut flattened = rects_to_series(&rects);
        let total = residency_sum(&mut flattened, None).unwrap();

        prop_assert!((total - expected).abs() < 1e-9);
    }

    #[test]
    fn prop_gap_filter_never_adds_events(
        series in event_series(),
        threshold in 0.0f64..0.05,
    ) {
        let filtered = filter_gaps_below(&series, threshold);

        prop_assert!(filtered.event_count() <= series.event_count());
        prop_assert_eq!(filtered.len(), series.len());
    }

    #[test]
    fn prop_aggregations_never_panic(series in event_series(), a in 0.0f64..0.2, b in 0.0f64..0.2) {
        let window = Window::new(a.min(b), a.max(b)).unwrap();

        let mut copy = series.clone();
        let _ = residency_sum(&mut copy, Some(window));
        let mut copy = series.clone();
        let _ = trace_event(&mut copy, Some(window));
        let mut copy = series;
        let _ = residency_sum(&mut copy, None);
    }
}
