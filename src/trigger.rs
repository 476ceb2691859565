//! Declarative sched_switch triggers
//!
//! A trigger names an event, a field filter, the value to emit when a row
//! matches and the field to pivot on:
//!
//! | EVENT          | VALUE | FILTER     |
//! |----------------|-------|------------|
//! | `sched_switch` | 1     | `next_pid` |
//! | `sched_switch` | -1    | `prev_pid` |
//!
//! Turning an event table into per-CPU series is left to the trace layer.

use crate::signal::{SCHED_SWITCH_IN, SCHED_SWITCH_OUT};
use serde::{Deserialize, Serialize};

/// Event the scheduler triggers read
pub const SCHED_SWITCH_EVENT: &str = "sched_switch";

/// Column holding the CPU an event occurred on
pub const CPU_FIELD: &str = "__cpu";

/// Column holding the PID of the task being scheduled in
pub const NEXT_PID_FIELD: &str = "next_pid";

/// Column holding the PID of the task being scheduled out
pub const PREV_PID_FIELD: &str = "prev_pid";

/// Equality filter on a PID column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerFilter {
    pub field: String,
    pub pid: i32,
}

/// One row of a sched_switch table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchRecord {
    pub time: f64,
    pub cpu: u32,
    pub prev_pid: i32,
    pub next_pid: i32,
}

impl SwitchRecord {
    /// Read an integer column by name
    pub fn field(&self, name: &str) -> Option<i64> {
        match name {
            CPU_FIELD => Some(self.cpu as i64),
            PREV_PID_FIELD => Some(self.prev_pid as i64),
            NEXT_PID_FIELD => Some(self.next_pid as i64),
            _ => None,
        }
    }
}

/// Declarative description of which rows become which event value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedTrigger {
    pub event: String,
    pub filter: TriggerFilter,
    pub value: i32,
    pub pivot: String,
}

impl SchedTrigger {
    /// Whether a row passes this trigger's filter
    pub fn matches(&self, record: &SwitchRecord) -> bool {
        record.field(&self.filter.field) == Some(self.filter.pid as i64)
    }

    /// Pivot key of a row (the CPU for scheduler triggers)
    pub fn pivot_of(&self, record: &SwitchRecord) -> Option<i64> {
        record.field(&self.pivot)
    }
}

fn sched_switch_trigger(field: &str, pid: i32, value: i32) -> SchedTrigger {
    SchedTrigger {
        event: SCHED_SWITCH_EVENT.to_string(),
        filter: TriggerFilter {
            field: field.to_string(),
            pid,
        },
        value,
        pivot: CPU_FIELD.to_string(),
    }
}

/// Switch-in trigger: `next_pid == pid` emits +1
pub fn sched_switch_in_trigger(pid: i32) -> SchedTrigger {
    sched_switch_trigger(NEXT_PID_FIELD, pid, SCHED_SWITCH_IN)
}

/// Switch-out trigger: `prev_pid == pid` emits -1
pub fn sched_switch_out_trigger(pid: i32) -> SchedTrigger {
    sched_switch_trigger(PREV_PID_FIELD, pid, SCHED_SWITCH_OUT)
}

/// Both triggers for `pid`: `[switch_in, switch_out]`
///
/// # Example
/// ```
/// use schedsig::trigger::{sched_triggers, SwitchRecord};
///
/// let [switch_in, switch_out] = sched_triggers(42);
/// let row = SwitchRecord { time: 1.0, cpu: 2, prev_pid: 7, next_pid: 42 };
/// assert!(switch_in.matches(&row));
/// assert!(!switch_out.matches(&row));
/// assert_eq!(switch_in.pivot_of(&row), Some(2));
/// ```
pub fn sched_triggers(pid: i32) -> [SchedTrigger; 2] {
    [sched_switch_in_trigger(pid), sched_switch_out_trigger(pid)]
}
