use anyhow::{Context, Result};
use clap::Parser;
use schedsig::aggregate::{aggregate_pivots, AggregateResult};
use schedsig::cli::{parse_pivots, Cli, OutputFormat};
use schedsig::csv_output::CsvOutput;
use schedsig::json_output::{JsonOutput, JsonParameters};
use std::collections::BTreeMap;
use std::fs;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Print results in the requested format
fn print_results(
    format: OutputFormat,
    parameters: JsonParameters,
    results: BTreeMap<u32, AggregateResult>,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for (cpu, result) in &results {
                println!("cpu {}: {}", cpu, result);
            }
        }
        OutputFormat::Json => {
            let mut output = JsonOutput::new(parameters);
            for (cpu, result) in results {
                output.add_pivot(cpu, result);
            }
            println!("{}", output.to_json()?);
        }
        OutputFormat::Csv => {
            let mut output = CsvOutput::new();
            for (cpu, result) in results {
                output.add_pivot(cpu, result);
            }
            print!("{}", output.to_csv());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = args.resolve_config()?;
    let func = args.agg_func(&config)?;

    let content = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read input file: {}", args.input.display()))?;
    let mut pivots = parse_pivots(&content)?;
    tracing::debug!("Loaded {} pivots from {}", pivots.len(), args.input.display());

    let results = aggregate_pivots(&mut pivots, func, config.window, &config)
        .with_context(|| format!("{} failed", func.name()))?;

    let parameters = JsonParameters {
        aggregation: func.name().to_string(),
        window: config.window,
        gap_threshold: config.filter_gaps.then_some(config.gap_threshold),
    };
    print_results(args.format, parameters, results)
}
