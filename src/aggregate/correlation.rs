// Binary correlation of two occupancy traces

use crate::error::{Result, SignalError};
use crate::signal::Sample;

/// Correlate two binary series sharing the same index
///
/// ```text
/// alpha = (N_agree - N_disagree) / N
/// ```
///
/// 1 means identical traces, -1 perfectly complementary ones.
///
/// # Errors
/// `LengthMismatch` for different lengths, `IndexMismatch` when a timestamp
/// differs, `EmptySeries` when both are empty.
///
/// # Example
/// ```
/// use schedsig::aggregate::binary_correlate;
/// use schedsig::signal::EventSeries;
///
/// let running = EventSeries::from_pairs([(0.0, 1), (1.0, -1), (2.0, 1)]).cumsum();
/// assert_eq!(binary_correlate(&running, &running)?, 1.0);
/// assert_eq!(binary_correlate(&running, &running.complement())?, -1.0);
/// # Ok::<(), schedsig::error::SignalError>(())
/// ```
pub fn binary_correlate<X, Y>(series_x: &X, series_y: &Y) -> Result<f64>
where
    X: AsRef<[Sample]> + ?Sized,
    Y: AsRef<[Sample]> + ?Sized,
{
    let x = series_x.as_ref();
    let y = series_y.as_ref();

    if x.len() != y.len() {
        return Err(SignalError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    if x.is_empty() {
        return Err(SignalError::EmptySeries);
    }

    let mut agree = 0usize;
    for (position, (a, b)) in x.iter().zip(y).enumerate() {
        if a.time != b.time {
            return Err(SignalError::IndexMismatch { position });
        }
        if a.value == b.value {
            agree += 1;
        }
    }
    let disagree = x.len() - agree;

    Ok((agree as f64 - disagree as f64) / x.len() as f64)
}
