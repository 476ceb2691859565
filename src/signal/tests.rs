// Tests for event/residency series primitives
//
// Boundary patterns follow what sched_switch traces actually produce:
// tasks already running when capture starts, tasks still running when it
// stops, and short preemptions.

use super::*;

fn values(series: &EventSeries) -> Vec<i32> {
    series.samples().iter().map(|s| s.value).collect()
}

fn times(series: &EventSeries) -> Vec<f64> {
    series.samples().iter().map(|s| s.time).collect()
}

fn window(start: f64, stop: f64) -> Window {
    Window::new(start, stop).unwrap()
}

#[test]
fn test_select_inclusive_bounds() {
    let series = EventSeries::from_pairs([(0.0, 1), (1.0, -1), (2.0, 1), (3.0, -1)]);
    let clipped = series.select(Some(window(1.0, 2.0)));
    assert_eq!(times(&clipped), vec![1.0, 2.0]);
    assert_eq!(values(&clipped), vec![-1, 1]);
}

#[test]
fn test_select_without_window_is_identity() {
    let mut series = EventSeries::from_pairs([(0.0, 1), (1.0, -1)]);
    series.sanitize(None);
    let copy = series.select(None);
    assert_eq!(copy, series);
    assert!(copy.is_sanitized());
}

#[test]
fn test_select_clipped_copy_is_unsanitized() {
    let mut series = EventSeries::from_pairs([(0.0, 1), (1.0, -1), (2.0, 1), (3.0, -1)]);
    series.sanitize(None);
    let clipped = series.select(Some(window(0.0, 3.0)));
    assert!(!clipped.is_sanitized());
}

#[test]
fn test_select_window_outside_series() {
    let series = EventSeries::from_pairs([(0.0, 1), (1.0, -1)]);
    assert!(series.select(Some(window(5.0, 6.0))).is_empty());
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "non-decreasing")]
fn test_from_pairs_rejects_unordered_in_debug() {
    let _ = EventSeries::from_pairs([(2.0, 1), (1.0, -1)]);
}

#[test]
fn test_from_pairs_accepts_repeated_timestamps() {
    let series = EventSeries::from_pairs([(1.0, 1), (1.0, -1), (1.0, 0)]);
    assert_eq!(series.select(Some(window(1.0, 1.0))).len(), 3);
}

#[test]
fn test_try_from_samples_validates() {
    let unordered = vec![Sample::new(1.0, 1), Sample::new(0.5, -1)];
    assert_eq!(
        EventSeries::try_from_samples(unordered),
        Err(crate::error::SignalError::UnorderedTimestamps { position: 1 })
    );

    let bad_value = vec![Sample::new(0.0, 1), Sample::new(1.0, 2)];
    assert_eq!(
        EventSeries::try_from_samples(bad_value),
        Err(crate::error::SignalError::InvalidEventValue {
            position: 1,
            value: 2
        })
    );

    let repeated = vec![Sample::new(1.0, 1), Sample::new(1.0, -1)];
    assert!(EventSeries::try_from_samples(repeated).is_ok());
}

#[test]
fn test_sanitize_leading_switch_out_on_first_sample() {
    let mut series = EventSeries::from_pairs([(0.0, -1), (1.0, 1), (2.0, -1)]);
    series.sanitize(Some(window(0.0, 2.0)));
    assert_eq!(values(&series), vec![0, 1, -1]);
}

#[test]
fn test_sanitize_synthetic_switch_in_moves_to_window_start() {
    let mut series = EventSeries::from_pairs([(1.0, 0), (2.0, -1), (3.0, 1), (4.0, -1)]);
    series.sanitize(Some(window(0.0, 4.0)));
    assert_eq!(values(&series), vec![1, -1, 1, -1]);
    assert_eq!(times(&series), vec![0.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_sanitize_synthetic_switch_in_without_window_keeps_time() {
    let mut series = EventSeries::from_pairs([(1.0, 0), (2.0, -1)]);
    series.sanitize(None);
    assert_eq!(values(&series), vec![1, -1]);
    assert_eq!(times(&series), vec![1.0, 2.0]);
}

#[test]
fn test_sanitize_trailing_switch_in_on_last_sample() {
    let mut series = EventSeries::from_pairs([(0.0, 1), (1.0, -1), (2.0, 1)]);
    series.sanitize(None);
    assert_eq!(values(&series), vec![1, -1, 0]);
}

#[test]
fn test_sanitize_synthetic_switch_out_moves_to_window_stop() {
    let mut series = EventSeries::from_pairs([(0.0, 1), (1.0, -1), (2.0, 1), (3.0, 0)]);
    series.sanitize(Some(window(0.0, 5.0)));
    assert_eq!(values(&series), vec![1, -1, 1, -1]);
    assert_eq!(times(&series), vec![0.0, 1.0, 2.0, 5.0]);
}

#[test]
fn test_sanitize_single_sample() {
    let mut series = EventSeries::from_pairs([(0.0, 1)]);
    series.sanitize(None);
    assert_eq!(values(&series), vec![0]);
    assert!(series.is_sanitized());
}

#[test]
fn test_sanitize_without_events_only_marks() {
    let mut series = EventSeries::from_pairs([(0.0, 0), (1.0, 0)]);
    series.sanitize(None);
    assert_eq!(values(&series), vec![0, 0]);
    assert!(series.is_sanitized());
}

#[test]
fn test_sanitize_is_idempotent() {
    let mut series = EventSeries::from_pairs([(1.0, 0), (2.0, -1), (3.0, 1)]);
    series.sanitize(Some(window(0.0, 3.0)));
    let once = series.clone();
    series.sanitize(Some(window(-10.0, 10.0)));
    assert_eq!(series, once);
    assert!(series.is_sanitized());
}

#[test]
fn test_filter_small_gaps_merges_short_preemption() {
    let series = EventSeries::from_pairs([(0.0, 1), (1.0, -1), (1.00005, 1), (2.0, -1)]);
    let filtered = filter_small_gaps(&series);
    assert_eq!(values(&filtered), vec![1, 0, 0, -1]);
    // Input untouched
    assert_eq!(values(&series), vec![1, -1, 1, -1]);
}

#[test]
fn test_filter_small_gaps_keeps_long_gap() {
    let series = EventSeries::from_pairs([(0.0, 1), (1.0, -1), (1.5, 1), (2.0, -1)]);
    let filtered = filter_small_gaps(&series);
    assert_eq!(values(&filtered), vec![1, -1, 1, -1]);
}

#[test]
fn test_filter_gap_requires_adjacent_pair() {
    // Leading switch-in has no preceding switch-out
    let series = EventSeries::from_pairs([(0.0, 1), (0.00001, -1)]);
    let filtered = filter_gaps_below(&series, 1.0);
    assert_eq!(values(&filtered), vec![1, -1]);
}

#[test]
fn test_cumsum_and_csum_window() {
    let series = EventSeries::from_pairs([(0.0, 1), (1.0, -1), (2.0, 1), (3.0, -1)]);
    let running = series.cumsum();
    let running_values: Vec<i32> = running.samples().iter().map(|s| s.value).collect();
    assert_eq!(running_values, vec![1, 0, 1, 0]);

    let clipped = csum(&series, Some(window(1.0, 2.0)), false);
    assert_eq!(clipped.len(), 2);
    assert_eq!(clipped.first_value(), Some(TASK_NOT_RUNNING));
    assert_eq!(clipped.last_value(), Some(TASK_RUNNING));
}

#[test]
fn test_csum_filter_gaps_keeps_task_running() {
    let series = EventSeries::from_pairs([(0.0, 1), (1.0, -1), (1.00001, 1), (2.0, -1)]);
    let running = csum(&series, Some(window(0.0, 1.5)), true);
    assert!(running.is_running_throughout());

    let unfiltered = csum(&series, Some(window(0.0, 1.5)), false);
    let unfiltered_values: Vec<i32> = unfiltered.samples().iter().map(|s| s.value).collect();
    assert_eq!(unfiltered_values, vec![1, 0, 1]);
}

#[test]
fn test_csum_with_custom_threshold() {
    let series = EventSeries::from_pairs([(0.0, 1), (1.0, -1), (1.2, 1), (2.0, -1)]);
    let running = csum_with_threshold(&series, None, Some(0.5));
    let running_values: Vec<i32> = running.samples().iter().map(|s| s.value).collect();
    assert_eq!(running_values, vec![1, 1, 1, 0]);
}

#[test]
fn test_residency_complement() {
    let series = EventSeries::from_pairs([(0.0, 1), (1.0, -1)]);
    let running = series.cumsum();
    let flipped: Vec<i32> = running.complement().samples().iter().map(|s| s.value).collect();
    assert_eq!(flipped, vec![0, 1]);
}
