// Boundary asymmetry correction and small-gap filtering
//
// A trace may start while the task is already running (first event is a
// switch-out) or stop while it still runs (last event is a switch-in).

use super::{
    EventSeries, Window, NO_EVENT, SCHED_SWITCH_IN, SCHED_SWITCH_OUT, TASK_NOT_RUNNING,
    WINDOW_SIZE,
};

impl EventSeries {
    /// Correct a dangling first switch-out and last switch-in
    ///
    /// - first sample is a switch-out: it is dropped to 0 (nothing known
    ///   before it)
    /// - otherwise, first event is a switch-out: the first sample becomes a
    ///   synthetic switch-in, moved to `window.start` when a window is given
    /// - the last sample mirrors this with switch-in/switch-out swapped and
    ///   `window.stop`
    /// - a single-sample series is reset to 0
    ///
    /// Applied at most once per instance; later calls are no-ops.
    ///
    /// # Example
    /// ```
    /// use schedsig::signal::EventSeries;
    ///
    /// let mut series = EventSeries::from_pairs([(0.0, 0), (1.0, -1), (2.0, 1), (3.0, -1)]);
    /// series.sanitize(None);
    /// assert_eq!(series.samples()[0].value, 1);
    /// assert!(series.is_sanitized());
    /// ```
    pub fn sanitize(&mut self, window: Option<Window>) {
        if self.sanitized {
            return;
        }

        let first_event = self.samples.iter().find(|s| s.value != NO_EVENT).map(|s| s.value);
        let last_event = self.samples.iter().rfind(|s| s.value != NO_EVENT).map(|s| s.value);
        let len = self.samples.len();

        if len >= 2 && first_event.is_some() {
            let first = &mut self.samples[0];
            if first.value == SCHED_SWITCH_OUT {
                tracing::debug!("Dropping leading switch-out at {}", first.time);
                first.value = TASK_NOT_RUNNING;
            } else if first_event == Some(SCHED_SWITCH_OUT) {
                first.value = SCHED_SWITCH_IN;
                if let Some(window) = window {
                    first.time = window.start;
                }
                tracing::debug!("Synthetic switch-in at {}", first.time);
            }

            let last = &mut self.samples[len - 1];
            if last.value == SCHED_SWITCH_IN {
                tracing::debug!("Dropping trailing switch-in at {}", last.time);
                last.value = TASK_NOT_RUNNING;
            } else if last_event == Some(SCHED_SWITCH_IN) {
                last.value = SCHED_SWITCH_OUT;
                if let Some(window) = window {
                    last.time = window.stop;
                }
                tracing::debug!("Synthetic switch-out at {}", last.time);
            }
        } else if len == 1 {
            // Not enough data to attribute any interval
            self.samples[0].value = TASK_NOT_RUNNING;
        }

        self.sanitized = true;
    }
}

/// Merge running intervals separated by less than [`WINDOW_SIZE`]
pub fn filter_small_gaps(series: &EventSeries) -> EventSeries {
    filter_gaps_below(series, WINDOW_SIZE)
}

/// Zero every switch-out immediately followed by a switch-in less than
/// `threshold` later, returning the filtered copy
///
/// # Example
/// ```
/// use schedsig::signal::{filter_gaps_below, EventSeries};
///
/// let series = EventSeries::from_pairs([(0.0, 1), (1.0, -1), (1.00001, 1), (2.0, -1)]);
/// let filtered = filter_gaps_below(&series, 0.0001);
/// assert_eq!(filtered.event_count(), 2);
/// ```
pub fn filter_gaps_below(series: &EventSeries, threshold: f64) -> EventSeries {
    let mut samples = series.samples.clone();
    let mut gap_start: Option<usize> = None;

    for i in 0..samples.len() {
        match samples[i].value {
            SCHED_SWITCH_IN => {
                if let Some(out) = gap_start.take() {
                    if samples[i].time - samples[out].time < threshold {
                        tracing::debug!(
                            "Merging gap {}..{}",
                            samples[out].time,
                            samples[i].time
                        );
                        samples[out].value = NO_EVENT;
                        samples[i].value = NO_EVENT;
                    }
                }
            }
            SCHED_SWITCH_OUT => gap_start = Some(i),
            _ => {}
        }
    }

    EventSeries {
        samples,
        sanitized: false,
    }
}
