// Activation period: deltas between successive switch-ins or switch-outs

use super::residency::with_sanitized_view;
use crate::signal::{EventSeries, Window, SCHED_SWITCH_IN, SCHED_SWITCH_OUT};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which trigger marks the start of a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Successive switch-ins
    #[default]
    Start,
    /// Successive switch-outs
    End,
}

impl Align {
    pub fn trigger_value(self) -> i32 {
        match self {
            Align::Start => SCHED_SWITCH_IN,
            Align::End => SCHED_SWITCH_OUT,
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Align::Start => write!(f, "start"),
            Align::End => write!(f, "end"),
        }
    }
}

/// Deltas between successive aligned triggers inside `window`
///
/// An even number of selected triggers is cut down to its first one, so
/// only odd counts above one produce deltas. This is a consecutive
/// difference, not period detection.
pub fn period(series: &mut EventSeries, align: Align, window: Option<Window>) -> Vec<f64> {
    let mut times = with_sanitized_view(series, window, |view| {
        view.times_of(align.trigger_value())
    });

    if times.len() % 2 == 0 {
        times.truncate(1);
    }

    times.windows(2).map(|pair| pair[1] - pair[0]).collect()
}
