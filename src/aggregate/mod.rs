// Aggregation functions over per-pivot event series
//
// Each function consumes one (task, CPU) event series and returns either a
// scalar, a single-element vector or a variable-length vector. Single-element
// results use absorbing sentinels so an external reducer can take min/max
// across CPUs without special-casing missing data:
//
//   first_time / first_cpu   -> [+inf]      when absent
//   last_time                -> [TIME_INVAL] when absent
//   last_cpu                 -> [0]         when absent

mod correlation;
mod occurrence;
mod period;
mod pivot;
mod residency;

pub use correlation::binary_correlate;
pub use occurrence::{first_cpu, first_time, last_cpu, last_time};
pub use period::{period, Align};
pub use pivot::{aggregate, aggregate_pivots, worker_limit, AggFunc, AggregateResult};
pub use residency::{rects_to_series, residency_sum, trace_event, Rect};
