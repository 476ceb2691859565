// Total residency and rectangle export

use crate::error::{Result, SignalError};
use crate::signal::{csum, EventSeries, Window, SCHED_SWITCH_IN, SCHED_SWITCH_OUT};

/// One running interval as `[start, stop]`
pub type Rect = [f64; 2];

/// Run `f` on the sanitized entries of `series` inside `window`
///
/// Without a window the caller's instance is sanitized in place. With a
/// window only the clipped copy is, with synthetic events moved to the
/// window bounds.
pub(super) fn with_sanitized_view<T>(
    series: &mut EventSeries,
    window: Option<Window>,
    f: impl FnOnce(&EventSeries) -> T,
) -> T {
    match window {
        None => {
            series.sanitize(None);
            f(series)
        }
        Some(_) => {
            let mut clipped = series.select(window);
            clipped.sanitize(window);
            f(&clipped)
        }
    }
}

fn switch_times(view: &EventSeries) -> (Vec<f64>, Vec<f64>) {
    (view.times_of(SCHED_SWITCH_IN), view.times_of(SCHED_SWITCH_OUT))
}

fn check_pairs(s_in: &[f64], s_out: &[f64]) -> Result<()> {
    if s_in.len() != s_out.len() {
        tracing::warn!(
            "Unmatched switch events: {} switch-in vs {} switch-out",
            s_in.len(),
            s_out.len()
        );
        return Err(SignalError::CountMismatch {
            switch_in: s_in.len(),
            switch_out: s_out.len(),
        });
    }
    Ok(())
}

/// Total time the task ran inside `window`
///
/// ```text
/// S_in  = i_1, i_2 ... i_N
/// S_out = o_1, o_2 ... o_N
/// R     = sum_k (o_k - i_k)
/// ```
///
/// When the clipped window holds no switch-in or no switch-out, the task may
/// have run through the whole window: the unclipped series is sanitized and
/// its residency checked at both window ends.
///
/// # Errors
/// `CountMismatch` when switch-in and switch-out counts differ inside the
/// window and the task did not run through it.
///
/// # Example
/// ```
/// use schedsig::aggregate::residency_sum;
/// use schedsig::signal::{EventSeries, Window};
///
/// let mut series = EventSeries::from_pairs([(0.0, 1), (1.0, -1), (2.0, 1), (3.0, -1)]);
/// let total = residency_sum(&mut series, Some(Window::new(0.0, 3.0)?))?;
/// assert_eq!(total, 2.0);
/// # Ok::<(), schedsig::error::SignalError>(())
/// ```
pub fn residency_sum(series: &mut EventSeries, window: Option<Window>) -> Result<f64> {
    if series.is_empty() {
        return Ok(0.0);
    }

    let (s_in, s_out) = with_sanitized_view(series, window, switch_times);

    if s_in.is_empty() || s_out.is_empty() {
        // No window means no bounds to attribute
        if let Some(window) = window {
            series.sanitize(None);
            if csum(series, Some(window), false).is_running_throughout() {
                return Ok(window.duration());
            }
        }
    }

    check_pairs(&s_in, &s_out)?;
    // f64::sum starts from -0.0; an empty window must report +0.0
    Ok(s_out
        .iter()
        .zip(&s_in)
        .fold(0.0, |total, (out, start)| total + (out - start)))
}

/// Running intervals inside `window`, for event plots
///
/// # Errors
/// `CountMismatch` when switch-in and switch-out counts differ.
pub fn trace_event(series: &mut EventSeries, window: Option<Window>) -> Result<Vec<Rect>> {
    let (s_in, s_out) = with_sanitized_view(series, window, switch_times);

    if s_in.is_empty() {
        return Ok(Vec::new());
    }

    check_pairs(&s_in, &s_out)?;
    Ok(s_in
        .into_iter()
        .zip(s_out)
        .map(|(start, stop)| [start, stop])
        .collect())
}

/// Flatten rectangles back into an event series
pub fn rects_to_series(rects: &[Rect]) -> EventSeries {
    rects
        .iter()
        .flat_map(|&[start, stop]| [(start, SCHED_SWITCH_IN), (stop, SCHED_SWITCH_OUT)])
        .collect()
}
