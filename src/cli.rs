//! CLI argument parsing for schedsig

use crate::aggregate::{AggFunc, Align};
use crate::config::AnalysisConfig;
use crate::signal::{EventSeries, Sample, Window};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Output format for aggregation results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

/// Aggregation to run on every CPU pivot
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Aggregation {
    /// Cumulative residency series
    Csum,
    /// Total running time
    ResidencySum,
    /// Time of the first switch-in
    FirstCpu,
    /// Time of the last switch-out
    LastCpu,
    /// First time the series equals --value
    FirstTime,
    /// Last time the series equals --value
    LastTime,
    /// Deltas between successive activations
    Period,
    /// Running intervals as [start, stop] pairs
    TraceEvent,
}

#[derive(Parser, Debug)]
#[command(name = "schedsig")]
#[command(version)]
#[command(about = "Residency statistics from per-CPU sched_switch event series", long_about = None)]
pub struct Cli {
    /// JSON file mapping CPU ids to [[time, value], ...] event series
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Aggregation function to apply on each CPU
    #[arg(short = 'a', long = "agg", value_enum, default_value = "residency-sum")]
    pub aggregation: Aggregation,

    /// Series value searched by first-time/last-time
    #[arg(long = "value", value_name = "VALUE", allow_hyphen_values = true)]
    pub value: Option<i32>,

    /// Trigger used by the period aggregation (overrides config)
    #[arg(long = "align", value_enum)]
    pub align: Option<Align>,

    /// Analysis window as START,STOP (overrides config)
    #[arg(
        short = 'w',
        long = "window",
        value_name = "START,STOP",
        allow_hyphen_values = true
    )]
    pub window: Option<Window>,

    /// Merge switch-out/switch-in gaps shorter than the gap threshold
    #[arg(long = "filter-gaps")]
    pub filter_gaps: bool,

    /// Small-gap threshold in trace time units (default: 0.0001)
    #[arg(long = "gap-threshold", value_name = "T")]
    pub gap_threshold: Option<f64>,

    /// TOML analysis configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Load the config file (if any) and apply command-line overrides
    pub fn resolve_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_toml(path)?,
            None => AnalysisConfig::default(),
        };

        if self.filter_gaps {
            config.filter_gaps = true;
        }
        if let Some(threshold) = self.gap_threshold {
            config.gap_threshold = threshold;
        }
        if let Some(align) = self.align {
            config.align = align;
        }
        if self.window.is_some() {
            config.window = self.window;
        }

        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }

    /// Aggregation function selected on the command line
    pub fn agg_func(&self, config: &AnalysisConfig) -> Result<AggFunc> {
        let func = match self.aggregation {
            Aggregation::Csum => AggFunc::Csum,
            Aggregation::ResidencySum => AggFunc::ResidencySum,
            Aggregation::FirstCpu => AggFunc::FirstCpu,
            Aggregation::LastCpu => AggFunc::LastCpu,
            Aggregation::FirstTime => AggFunc::FirstTime {
                value: self.value.context("--value is required for first-time")?,
            },
            Aggregation::LastTime => AggFunc::LastTime {
                value: self.value.context("--value is required for last-time")?,
            },
            Aggregation::Period => AggFunc::Period {
                align: config.align,
            },
            Aggregation::TraceEvent => AggFunc::TraceEvent,
        };
        Ok(func)
    }
}

/// Parse `{ "<cpu>": [[time, value], ...] }` into validated event series
pub fn parse_pivots(content: &str) -> Result<BTreeMap<u32, EventSeries>> {
    let raw: BTreeMap<u32, Vec<Sample>> =
        serde_json::from_str(content).context("Failed to parse event series JSON")?;

    raw.into_iter()
        .map(|(cpu, samples)| -> Result<(u32, EventSeries)> {
            let series = EventSeries::try_from_samples(samples)
                .with_context(|| format!("Invalid event series for cpu {}", cpu))?;
            Ok((cpu, series))
        })
        .collect()
}
