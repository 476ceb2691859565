//! JSON output format for per-pivot aggregation results

use crate::aggregate::AggregateResult;
use crate::signal::Window;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Run parameters echoed in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonParameters {
    /// Aggregation function name (e.g., "residency_sum")
    pub aggregation: String,
    /// Analysis window, absent when the whole series was used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<Window>,
    /// Small-gap threshold when gap filtering was enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_threshold: Option<f64>,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    pub parameters: JsonParameters,
    /// Result per CPU pivot
    pub pivots: BTreeMap<u32, AggregateResult>,
}

impl JsonOutput {
    /// Create a new JSON output structure
    pub fn new(parameters: JsonParameters) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "schedsig-json-v1".to_string(),
            parameters,
            pivots: BTreeMap::new(),
        }
    }

    /// Record the result of one pivot
    pub fn add_pivot(&mut self, cpu: u32, result: AggregateResult) {
        self.pivots.insert(cpu, result);
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
