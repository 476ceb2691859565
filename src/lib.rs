//! schedsig - Scheduler residency signals for per-CPU sched_switch series
//!
//! This library turns switch-in/switch-out event series into residency
//! signals and aggregates them: total residency, activation period,
//! first/last activity, binary correlation and running-interval rectangles.
//! Building the series from a trace and reducing per-CPU results across a
//! topology are left to the caller.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod json_output;
pub mod signal;
pub mod trigger;
