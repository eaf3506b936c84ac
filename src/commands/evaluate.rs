use anyhow::{Context, Result};

use demandcast::config::Config;
use demandcast::forecast::evaluate_holdout;
use demandcast::report::{OutputFormat, ReportRenderer};

use super::input::load_series;

pub fn evaluate(input: &str, holdout: usize, config: &Config, format: OutputFormat) -> Result<()> {
    let report = load_series(input, config)?;

    let evaluation = evaluate_holdout(&report.series, holdout)
        .with_context(|| format!("Failed to evaluate a holdout of {holdout} period(s)"))?;
    tracing::info!(
        holdout,
        mae = evaluation.mae,
        rmse = evaluation.rmse,
        mape = ?evaluation.mape,
        "Holdout evaluation complete"
    );

    let renderer = ReportRenderer::new()?;
    let rendered = renderer
        .render_evaluation(&evaluation, format)
        .context("Failed to render evaluation")?;
    println!("{rendered}");

    Ok(())
}
