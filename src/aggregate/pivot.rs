// Aggregation dispatch, per series and across CPU pivots

use super::{
    first_cpu, first_time, last_cpu, last_time, period, residency_sum, trace_event, Align, Rect,
};
use crate::config::AnalysisConfig;
use crate::error::{Result, SignalError};
use crate::signal::{csum, filter_gaps_below, EventSeries, ResidencySeries, Window};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// An aggregation function applied to one pivot's series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "function", rename_all = "snake_case")]
pub enum AggFunc {
    Csum,
    ResidencySum,
    FirstCpu,
    LastCpu,
    FirstTime { value: i32 },
    LastTime { value: i32 },
    Period { align: Align },
    TraceEvent,
}

impl AggFunc {
    pub fn name(&self) -> &'static str {
        match self {
            AggFunc::Csum => "csum",
            AggFunc::ResidencySum => "residency_sum",
            AggFunc::FirstCpu => "first_cpu",
            AggFunc::LastCpu => "last_cpu",
            AggFunc::FirstTime { .. } => "first_time",
            AggFunc::LastTime { .. } => "last_time",
            AggFunc::Period { .. } => "period",
            AggFunc::TraceEvent => "trace_event",
        }
    }
}

/// Output of one aggregation
///
/// Serialized untagged: a number, a list of numbers, a list of
/// `[start, stop]` pairs or a list of `[time, value]` pairs. Non-finite
/// sentinels serialize as the strings `"inf"`, `"-inf"` and `"nan"`, which
/// `str::parse::<f64>` reads back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AggregateResult {
    Scalar(#[serde(serialize_with = "serialize_sentinel")] f64),
    Vector(#[serde(serialize_with = "serialize_sentinels")] Vec<f64>),
    Rects(Vec<Rect>),
    Residency(ResidencySeries),
}

/// JSON has no literal for infinities or NaN
fn sentinel_token(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("nan")
    } else if value == f64::INFINITY {
        Some("inf")
    } else if value == f64::NEG_INFINITY {
        Some("-inf")
    } else {
        None
    }
}

fn serialize_sentinel<S: Serializer>(
    value: &f64,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match sentinel_token(*value) {
        Some(token) => serializer.serialize_str(token),
        None => serializer.serialize_f64(*value),
    }
}

struct Sentinel(f64);

impl Serialize for Sentinel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_sentinel(&self.0, serializer)
    }
}

fn serialize_sentinels<S: Serializer>(
    values: &[f64],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(values.len()))?;
    for &value in values {
        seq.serialize_element(&Sentinel(value))?;
    }
    seq.end()
}

impl fmt::Display for AggregateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateResult::Scalar(value) => write!(f, "{}", value),
            AggregateResult::Vector(values) => write!(f, "{:?}", values),
            AggregateResult::Rects(rects) => write!(f, "{:?}", rects),
            AggregateResult::Residency(series) => {
                let pairs: Vec<(f64, i32)> =
                    series.samples().iter().map(|s| (s.time, s.value)).collect();
                write!(f, "{:?}", pairs)
            }
        }
    }
}

/// Apply `func` to `series` inside `window`
///
/// With `config.filter_gaps` set, the small-gap filter runs first on a
/// private copy, so the caller's series is only ever touched by
/// sanitization.
pub fn aggregate(
    series: &mut EventSeries,
    func: AggFunc,
    window: Option<Window>,
    config: &AnalysisConfig,
) -> Result<AggregateResult> {
    let mut filtered;
    let series = match config.filter_gaps.then_some(config.gap_threshold) {
        Some(threshold) => {
            filtered = filter_gaps_below(series, threshold);
            &mut filtered
        }
        None => series,
    };

    let result = match func {
        AggFunc::Csum => AggregateResult::Residency(csum(series, window, false)),
        AggFunc::ResidencySum => AggregateResult::Scalar(residency_sum(series, window)?),
        AggFunc::FirstCpu => AggregateResult::Vector(first_cpu(series, window)),
        AggFunc::LastCpu => AggregateResult::Vector(last_cpu(series, window)),
        AggFunc::FirstTime { value } => AggregateResult::Vector(first_time(series, value, window)),
        AggFunc::LastTime { value } => AggregateResult::Vector(last_time(series, value, window)),
        AggFunc::Period { align } => AggregateResult::Vector(period(series, align, window)),
        AggFunc::TraceEvent => AggregateResult::Rects(trace_event(series, window)?),
    };

    Ok(result)
}

/// Number of pivot workers allowed to run at once
pub fn worker_limit() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

/// Apply `func` to every CPU pivot on scoped workers
///
/// Pivots run in CPU order, at most [`worker_limit`] at a time. Workers
/// share nothing mutable: each owns `&mut` to exactly one series.
///
/// # Errors
/// The first aggregation error in CPU order, `WorkerSpawn` when the OS
/// refuses a thread, or `WorkerPanicked`.
pub fn aggregate_pivots(
    pivots: &mut BTreeMap<u32, EventSeries>,
    func: AggFunc,
    window: Option<Window>,
    config: &AnalysisConfig,
) -> Result<BTreeMap<u32, AggregateResult>> {
    aggregate_pivots_bounded(pivots, func, window, config, worker_limit())
}

fn aggregate_pivots_bounded(
    pivots: &mut BTreeMap<u32, EventSeries>,
    func: AggFunc,
    window: Option<Window>,
    config: &AnalysisConfig,
    max_workers: usize,
) -> Result<BTreeMap<u32, AggregateResult>> {
    let mut entries: Vec<(u32, &mut EventSeries)> =
        pivots.iter_mut().map(|(&cpu, series)| (cpu, series)).collect();
    let mut results = BTreeMap::new();

    for chunk in entries.chunks_mut(max_workers.max(1)) {
        let joined = crossbeam::thread::scope(|scope| -> Result<Vec<_>> {
            let mut handles = Vec::with_capacity(chunk.len());
            for (cpu, series) in chunk.iter_mut() {
                let cpu = *cpu;
                tracing::trace!("Aggregating {} on cpu {}", func.name(), cpu);
                let handle = scope
                    .builder()
                    .name(format!("schedsig-cpu{}", cpu))
                    .spawn(move |_| aggregate(series, func, window, config))
                    .map_err(|e| SignalError::WorkerSpawn {
                        cpu,
                        reason: e.to_string(),
                    })?;
                handles.push((cpu, handle));
            }

            Ok(handles
                .into_iter()
                .map(|(cpu, handle)| (cpu, handle.join()))
                .collect())
        })
        .map_err(|_| SignalError::WorkerPanicked { cpu: None })??;

        for (cpu, outcome) in joined {
            let result = outcome.map_err(|_| SignalError::WorkerPanicked { cpu: Some(cpu) })??;
            results.insert(cpu, result);
        }
    }

    Ok(results)
}
