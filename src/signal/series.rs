// Event series: time-indexed switch-in/switch-out values for one pivot

use super::{ResidencySeries, Window, NO_EVENT, SCHED_SWITCH_IN, SCHED_SWITCH_OUT};
use crate::error::{Result, SignalError};
use serde::{Deserialize, Serialize};

/// One indexed entry of a series
///
/// Serialized as a `[time, value]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, i32)", into = "(f64, i32)")]
pub struct Sample {
    pub time: f64,
    pub value: i32,
}

impl Sample {
    pub fn new(time: f64, value: i32) -> Self {
        Self { time, value }
    }
}

impl From<(f64, i32)> for Sample {
    fn from((time, value): (f64, i32)) -> Self {
        Self { time, value }
    }
}

impl From<Sample> for (f64, i32) {
    fn from(sample: Sample) -> Self {
        (sample.time, sample.value)
    }
}

/// Clip ordered samples to a closed window
pub(crate) fn clip(samples: &[Sample], window: Option<Window>) -> &[Sample] {
    let Some(window) = window else {
        return samples;
    };

    let lo = samples.partition_point(|s| s.time < window.start);
    let hi = samples.partition_point(|s| s.time <= window.stop);
    if lo >= hi {
        &[]
    } else {
        &samples[lo..hi]
    }
}

/// Switch-in/switch-out events of one task on one CPU
///
/// The `sanitized` flag belongs to this instance only: a clipped copy starts
/// unsanitized, so per-pivot processing never shares the marker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventSeries {
    pub(super) samples: Vec<Sample>,
    pub(super) sanitized: bool,
}

impl EventSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from `(time, value)` pairs produced by a trusted
    /// trigger layer. Timestamps must already be non-decreasing: window
    /// clipping binary-searches them, so unsorted input clips arbitrarily in
    /// release builds and panics in debug builds. Use
    /// [`EventSeries::try_from_samples`] for untrusted input.
    ///
    /// # Example
    /// ```
    /// use schedsig::signal::EventSeries;
    ///
    /// let series = EventSeries::from_pairs([(0.0, 1), (1.0, -1)]);
    /// assert_eq!(series.len(), 2);
    /// assert!(!series.is_sanitized());
    /// ```
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, i32)>,
    {
        pairs.into_iter().collect()
    }

    /// Build a series from untrusted input, validating order and values
    pub fn try_from_samples(samples: Vec<Sample>) -> Result<Self> {
        let mut previous = f64::NEG_INFINITY;
        for (position, sample) in samples.iter().enumerate() {
            if !sample.time.is_finite() || sample.time < previous {
                return Err(SignalError::UnorderedTimestamps { position });
            }
            if !matches!(sample.value, SCHED_SWITCH_OUT | NO_EVENT | SCHED_SWITCH_IN) {
                return Err(SignalError::InvalidEventValue {
                    position,
                    value: sample.value,
                });
            }
            previous = sample.time;
        }

        Ok(Self {
            samples,
            sanitized: false,
        })
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

    /// Whether boundary asymmetry has already been corrected on this instance
    pub fn is_sanitized(&self) -> bool {
        self.sanitized
    }

    /// Number of non-zero entries
    pub fn event_count(&self) -> usize {
        self.samples.iter().filter(|s| s.value != NO_EVENT).count()
    }

    /// Timestamps of every entry equal to `value`, in order
    pub fn times_of(&self, value: i32) -> Vec<f64> {
        self.samples
            .iter()
            .filter(|s| s.value == value)
            .map(|s| s.time)
            .collect()
    }

    /// Borrow the entries inside `window` (all entries when `None`)
    pub fn window_slice(&self, window: Option<Window>) -> &[Sample] {
        clip(&self.samples, window)
    }

    /// Copy of the entries inside `window`
    ///
    /// A clipped copy is a new, unsanitized instance. Without a window the
    /// copy keeps the marker since it holds exactly the same entries.
    pub fn select(&self, window: Option<Window>) -> EventSeries {
        match window {
            None => self.clone(),
            Some(_) => EventSeries {
                samples: self.window_slice(window).to_vec(),
                sanitized: false,
            },
        }
    }

    /// Running sum of the event values
    pub fn cumsum(&self) -> ResidencySeries {
        let mut running = 0;
        let samples = self
            .samples
            .iter()
            .map(|s| {
                running += s.value;
                Sample::new(s.time, running)
            })
            .collect();
        ResidencySeries::from_samples(samples)
    }
}

impl FromIterator<(f64, i32)> for EventSeries {
    fn from_iter<I: IntoIterator<Item = (f64, i32)>>(iter: I) -> Self {
        let samples: Vec<Sample> = iter.into_iter().map(Sample::from).collect();
        debug_assert!(
            samples.windows(2).all(|w| w[0].time <= w[1].time),
            "event series timestamps must be non-decreasing"
        );
        Self {
            samples,
            sanitized: false,
        }
    }
}

impl AsRef<[Sample]> for EventSeries {
    fn as_ref(&self) -> &[Sample] {
        &self.samples
    }
}
