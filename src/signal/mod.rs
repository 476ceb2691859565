// Scheduler event and residency signals
//
// An event series is the combination of two sched_switch triggers for one
// task on one CPU:
//
//   sched_switch  next_pid == pid  ->  +1  (switch in)
//   sched_switch  prev_pid == pid  ->  -1  (switch out)
//
// Timestamps without an event carry 0. The running sum of an event series is
// the residency series: 1 while the task occupies the CPU, 0 otherwise.
// Traces rarely start or stop on a switch boundary, so the sanitizer rewrites
// the dangling first/last event before residency is computed.

mod residency;
mod sanitize;
mod series;
mod window;

pub use residency::{csum, csum_with_threshold, ResidencySeries};
pub use sanitize::{filter_gaps_below, filter_small_gaps};
pub use series::{EventSeries, Sample};
pub use window::Window;

/// Threshold below which a switch-out/switch-in gap is ignored
pub const WINDOW_SIZE: f64 = 0.0001;

/// Event value when a task is switched in on a CPU
pub const SCHED_SWITCH_IN: i32 = 1;

/// Event value when a task relinquishes a CPU
pub const SCHED_SWITCH_OUT: i32 = -1;

/// No event at this timestamp
pub const NO_EVENT: i32 = 0;

/// Residency value while the task runs
pub const TASK_RUNNING: i32 = 1;

/// Residency value while the task does not run
pub const TASK_NOT_RUNNING: i32 = 0;

/// Standard value for invalid time data
pub const TIME_INVAL: f64 = -1.0;

#[cfg(test)]
mod tests;
