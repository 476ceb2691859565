//! CSV output format for per-pivot aggregation results
//!
//! The header depends on the result shape of the aggregation:
//! - rectangles: `cpu,start,stop`
//! - residency series: `cpu,time,value`
//! - scalars and vectors: `cpu,index,value`

use crate::aggregate::AggregateResult;

/// CSV output formatter
#[derive(Debug, Default)]
pub struct CsvOutput {
    rows: Vec<(u32, AggregateResult)>,
}

impl CsvOutput {
    /// Create a new CSV output formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the result of one pivot
    pub fn add_pivot(&mut self, cpu: u32, result: AggregateResult) {
        self.rows.push((cpu, result));
    }

    /// Header row for the shape of the first result
    fn header(&self) -> &'static str {
        match self.rows.first() {
            Some((_, AggregateResult::Rects(_))) => "cpu,start,stop",
            Some((_, AggregateResult::Residency(_))) => "cpu,time,value",
            _ => "cpu,index,value",
        }
    }

    fn format_pivot(output: &mut String, cpu: u32, result: &AggregateResult) {
        match result {
            AggregateResult::Scalar(value) => {
                output.push_str(&format!("{},0,{}\n", cpu, value));
            }
            AggregateResult::Vector(values) => {
                for (index, value) in values.iter().enumerate() {
                    output.push_str(&format!("{},{},{}\n", cpu, index, value));
                }
            }
            AggregateResult::Rects(rects) => {
                for [start, stop] in rects {
                    output.push_str(&format!("{},{},{}\n", cpu, start, stop));
                }
            }
            AggregateResult::Residency(series) => {
                for sample in series.samples() {
                    output.push_str(&format!("{},{},{}\n", cpu, sample.time, sample.value));
                }
            }
        }
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(self.header());
        output.push('\n');

        for (cpu, result) in &self.rows {
            Self::format_pivot(&mut output, *cpu, result);
        }

        output
    }
}
