//! Analysis configuration
//!
//! Loaded from TOML; every field is optional and command-line flags take
//! precedence over file values.

use crate::aggregate::Align;
use crate::signal::{Window, WINDOW_SIZE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration shared by every aggregation of one run
///
/// # Example TOML
/// ```toml
/// gap_threshold = 0.0005
/// filter_gaps = true
/// align = "end"
///
/// [window]
/// start = 0.0
/// stop = 3.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Switch-out/switch-in gaps shorter than this are merged when
    /// `filter_gaps` is set
    ///
    /// Default: 1e-4
    pub gap_threshold: f64,

    /// Merge short preemptions before aggregating
    pub filter_gaps: bool,

    /// Trigger used by the period aggregation
    pub align: Align,

    /// Analysis window (whole series when absent)
    pub window: Option<Window>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            gap_threshold: WINDOW_SIZE,
            filter_gaps: false,
            align: Align::Start,
            window: None,
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a configuration file
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file: {}", path.as_ref().display())
        })?;

        let config: AnalysisConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML analysis config")?;
        config.validate().map_err(anyhow::Error::msg)?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.gap_threshold.is_finite() || self.gap_threshold < 0.0 {
            return Err(format!(
                "gap_threshold must be finite and non-negative, got {}",
                self.gap_threshold
            ));
        }

        if let Some(window) = &self.window {
            window.check().map_err(|e| e.to_string())?;
        }

        Ok(())
    }
}
