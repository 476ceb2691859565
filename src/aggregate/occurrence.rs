// First/last occurrence queries
//
// Results are vectors of unit length so they can be concatenated and
// reduced across pivots (min for "first", max for "last").

use crate::signal::{EventSeries, Window, SCHED_SWITCH_IN, SCHED_SWITCH_OUT, TIME_INVAL};

fn first_match(series: &EventSeries, value: i32, window: Option<Window>) -> Option<f64> {
    series
        .window_slice(window)
        .iter()
        .find(|s| s.value == value)
        .map(|s| s.time)
}

fn last_match(series: &EventSeries, value: i32, window: Option<Window>) -> Option<f64> {
    series
        .window_slice(window)
        .iter()
        .rfind(|s| s.value == value)
        .map(|s| s.time)
}

/// First timestamp where the series equals `value`, `[+inf]` when absent
pub fn first_time(series: &EventSeries, value: i32, window: Option<Window>) -> Vec<f64> {
    vec![first_match(series, value, window).unwrap_or(f64::INFINITY)]
}

/// Last timestamp where the series equals `value`, `[TIME_INVAL]` when absent
pub fn last_time(series: &EventSeries, value: i32, window: Option<Window>) -> Vec<f64> {
    vec![last_match(series, value, window).unwrap_or(TIME_INVAL)]
}

/// Time of the first switch-in, `[+inf]` when the task never ran here
///
/// # Example
/// ```
/// use schedsig::aggregate::first_cpu;
/// use schedsig::signal::EventSeries;
///
/// let series = EventSeries::from_pairs([(0.5, 1), (1.0, -1)]);
/// assert_eq!(first_cpu(&series, None), vec![0.5]);
/// assert_eq!(first_cpu(&EventSeries::new(), None), vec![f64::INFINITY]);
/// ```
pub fn first_cpu(series: &EventSeries, window: Option<Window>) -> Vec<f64> {
    vec![first_match(series, SCHED_SWITCH_IN, window).unwrap_or(f64::INFINITY)]
}

/// Time of the last switch-out, `[0]` when the task never left this CPU
pub fn last_cpu(series: &EventSeries, window: Option<Window>) -> Vec<f64> {
    vec![last_match(series, SCHED_SWITCH_OUT, window).unwrap_or(0.0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> EventSeries {
        EventSeries::from_pairs([(0.0, 1), (1.0, -1), (2.0, 1), (3.0, -1)])
    }

    #[test]
    fn test_first_and_last_time() {
        let series = series();
        assert_eq!(first_time(&series, SCHED_SWITCH_OUT, None), vec![1.0]);
        assert_eq!(last_time(&series, SCHED_SWITCH_IN, None), vec![2.0]);
    }

    #[test]
    fn test_sentinels_when_absent() {
        let series = series();
        assert_eq!(first_time(&series, 5, None), vec![f64::INFINITY]);
        assert_eq!(last_time(&series, 5, None), vec![TIME_INVAL]);

        let quiet = EventSeries::from_pairs([(0.0, 0)]);
        assert_eq!(first_cpu(&quiet, None), vec![f64::INFINITY]);
        assert_eq!(last_cpu(&quiet, None), vec![0.0]);
    }

    #[test]
    fn test_window_restricts_search() {
        let series = series();
        let window = Some(Window::new(0.5, 2.5).unwrap());
        assert_eq!(first_cpu(&series, window), vec![2.0]);
        assert_eq!(last_cpu(&series, window), vec![1.0]);
        assert_eq!(last_time(&series, SCHED_SWITCH_OUT, window), vec![1.0]);
    }
}
