use anyhow::{Context, Result};

use demandcast::config::Config;
use demandcast::report::{OutputFormat, ReportRenderer};
use demandcast::SeriesSummary;

use super::input::load_series;

pub fn summary(input: &str, config: &Config, format: OutputFormat) -> Result<()> {
    let report = load_series(input, config)?;
    let summary = SeriesSummary::from_series(&report.series);

    let renderer = ReportRenderer::new()?;
    let rendered = renderer
        .render_summary(&summary, format)
        .context("Failed to render summary")?;
    println!("{rendered}");

    Ok(())
}
