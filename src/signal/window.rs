// Analysis window: closed interval [start, stop]

use crate::error::{Result, SignalError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A closed time interval used to clip a series
///
/// # Example
/// ```
/// use schedsig::signal::Window;
///
/// let window: Window = "0.5,2.0".parse().unwrap();
/// assert_eq!(window.duration(), 1.5);
/// assert!(window.contains(2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub start: f64,
    pub stop: f64,
}

impl Window {
    /// Create a window, rejecting `start > stop` and NaN bounds
    pub fn new(start: f64, stop: f64) -> Result<Self> {
        let window = Self { start, stop };
        window.check()?;
        Ok(window)
    }

    /// Verify the bounds of a window built by hand or deserialized
    pub fn check(&self) -> Result<()> {
        if self.start.is_nan() || self.stop.is_nan() || self.start > self.stop {
            return Err(SignalError::InvalidWindow {
                start: self.start,
                stop: self.stop,
            });
        }
        Ok(())
    }

    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.stop
    }

    pub fn duration(&self) -> f64 {
        self.stop - self.start
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.stop)
    }
}

impl FromStr for Window {
    type Err = String;

    /// Parse `START,STOP`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (start, stop) = s
            .split_once(',')
            .ok_or_else(|| format!("Invalid window '{}'. Expected format: START,STOP", s))?;

        let start: f64 = start
            .trim()
            .parse()
            .map_err(|e| format!("Invalid window start '{}': {}", start.trim(), e))?;
        let stop: f64 = stop
            .trim()
            .parse()
            .map_err(|e| format!("Invalid window stop '{}': {}", stop.trim(), e))?;

        Window::new(start, stop).map_err(|e| e.to_string())
    }
}
