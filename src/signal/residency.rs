// Residency series: cumulative sum of an event series

use super::series::clip;
use super::{filter_gaps_below, EventSeries, Sample, Window, TASK_RUNNING, WINDOW_SIZE};
use serde::{Deserialize, Serialize};

/// Step function of task occupancy, 1 while running and 0 otherwise
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResidencySeries {
    samples: Vec<Sample>,
}

impl ResidencySeries {
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn first_value(&self) -> Option<i32> {
        self.samples.first().map(|s| s.value)
    }

    pub fn last_value(&self) -> Option<i32> {
        self.samples.last().map(|s| s.value)
    }

    /// True when the task is running at both ends of the series
    pub fn is_running_throughout(&self) -> bool {
        self.first_value() == Some(TASK_RUNNING) && self.last_value() == Some(TASK_RUNNING)
    }

    pub fn select(&self, window: Option<Window>) -> ResidencySeries {
        Self::from_samples(clip(&self.samples, window).to_vec())
    }

    /// Swap running and not-running at every index
    pub fn complement(&self) -> ResidencySeries {
        let samples = self
            .samples
            .iter()
            .map(|s| Sample::new(s.time, TASK_RUNNING - s.value))
            .collect();
        Self::from_samples(samples)
    }
}

impl AsRef<[Sample]> for ResidencySeries {
    fn as_ref(&self) -> &[Sample] {
        &self.samples
    }
}

/// Cumulative residency of `series` inside `window`
///
/// With `filter_gaps`, switch-out/switch-in gaps shorter than
/// [`WINDOW_SIZE`] are merged before summing. No sanitization happens here.
///
/// # Example
/// ```
/// use schedsig::signal::{csum, EventSeries, Window};
///
/// let series = EventSeries::from_pairs([(0.0, 1), (1.0, -1), (2.0, 1), (3.0, -1)]);
/// let running = csum(&series, Some(Window::new(0.5, 2.5).unwrap()), false);
/// let values: Vec<i32> = running.samples().iter().map(|s| s.value).collect();
/// assert_eq!(values, vec![0, 1]);
/// ```
pub fn csum(series: &EventSeries, window: Option<Window>, filter_gaps: bool) -> ResidencySeries {
    let threshold = filter_gaps.then_some(WINDOW_SIZE);
    csum_with_threshold(series, window, threshold)
}

/// [`csum`] with an explicit small-gap threshold (`None` disables filtering)
pub fn csum_with_threshold(
    series: &EventSeries,
    window: Option<Window>,
    gap_threshold: Option<f64>,
) -> ResidencySeries {
    let running = match gap_threshold {
        Some(threshold) => filter_gaps_below(series, threshold).cumsum(),
        None => series.cumsum(),
    };
    running.select(window)
}
