use anyhow::{Context, Result};

use demandcast::config::Config;
use demandcast::report::{OutputFormat, ReportRenderer};

use super::input::load_series;

pub fn forecast(input: &str, config: &Config, format: OutputFormat) -> Result<()> {
    let report = load_series(input, config)?;
    let forecaster = config.forecaster()?;

    let result = forecaster
        .forecast(&report.series)
        .context("Failed to project the demand trend")?;
    tracing::info!(
        periods = forecaster.periods(),
        first = ?result.forecast_labels.first(),
        last = ?result.forecast_labels.last(),
        "Forecast complete"
    );

    let renderer = ReportRenderer::new()?;
    let rendered = renderer
        .render_forecast(&result, format)
        .context("Failed to render forecast")?;
    println!("{rendered}");

    Ok(())
}
