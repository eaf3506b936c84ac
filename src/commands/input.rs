use anyhow::{Context, Result};
use std::io::Read;

use demandcast::config::Config;
use demandcast::parser::{parse_with, ParseReport};

/// Read the whole input, `-` meaning stdin
pub fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read CSV from stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(input).with_context(|| format!("Failed to read input file: {input}"))
}

/// Read and parse `input` with the configured parser options
pub fn load_series(input: &str, config: &Config) -> Result<ParseReport> {
    let text = read_input(input)?;
    let report = parse_with(&text, &config.parser_options())
        .with_context(|| format!("Failed to load demand series from {input}"))?;

    if !report.skipped.is_empty() {
        tracing::warn!(
            skipped = report.skipped.len(),
            rows_read = report.rows_read,
            "Skipped rows with an unparsable date or demand value"
        );
    }
    tracing::info!(
        observations = report.rows_kept(),
        first = %report.series.first().label(),
        last = %report.series.last().label(),
        "Loaded demand series"
    );

    Ok(report)
}
