//! Error types for signal construction and aggregation
//!
//! Two kinds are expected in normal use: `CountMismatch` reports a trace
//! inconsistency inside the requested window, `LengthMismatch` reports two
//! series that cannot be compared. Everything else is a construction or
//! usage error.

use thiserror::Error;

/// Errors raised by the signal and aggregation functions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error("Unexpected Lengths: s_in={switch_in}, s_out={switch_out}")]
    CountMismatch { switch_in: usize, switch_out: usize },

    #[error("Cannot compute binary correlation for unequal vectors: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Cannot compute binary correlation: index differs at position {position}")]
    IndexMismatch { position: usize },

    #[error("Cannot compute binary correlation of empty series")]
    EmptySeries,

    #[error("Invalid window: start {start} is after stop {stop}")]
    InvalidWindow { start: f64, stop: f64 },

    #[error("Timestamps must be finite and non-decreasing (position {position})")]
    UnorderedTimestamps { position: usize },

    #[error("Invalid event value {value} at position {position}: expected -1, 0 or 1")]
    InvalidEventValue { position: usize, value: i32 },

    #[error("Failed to spawn aggregation worker for cpu {cpu}: {reason}")]
    WorkerSpawn { cpu: u32, reason: String },

    #[error("Aggregation worker panicked (cpu {cpu:?})")]
    WorkerPanicked { cpu: Option<u32> },
}

pub type Result<T> = std::result::Result<T, SignalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_mismatch_message() {
        let err = SignalError::CountMismatch {
            switch_in: 3,
            switch_out: 2,
        };
        assert_eq!(err.to_string(), "Unexpected Lengths: s_in=3, s_out=2");
    }

    #[test]
    fn test_length_mismatch_message() {
        let err = SignalError::LengthMismatch { left: 5, right: 4 };
        assert!(err.to_string().contains("5 vs 4"));
    }
}
