//! Report rendering with Handlebars templates
//!
//! Renders forecasts, summaries and holdout evaluations either as JSON (the
//! payload a charting front end consumes) or as plain text through the
//! templates under `templates/`.

use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::forecast::HoldoutEvaluation;
use crate::models::{ForecastResult, SeriesSummary};

const FORECAST_TEMPLATE: &str = include_str!("../../templates/forecast.hbs");
const SUMMARY_TEMPLATE: &str = include_str!("../../templates/summary.hbs");
const EVALUATION_TEMPLATE: &str = include_str!("../../templates/evaluation.hbs");

/// Output format of a rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(Error::config(format!(
                "unknown output format '{other}' (expected text or json)"
            ))),
        }
    }
}

#[derive(Debug, Serialize)]
struct LabeledValue {
    label: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct ForecastTemplateData {
    periods: usize,
    last_date: String,
    history_count: usize,
    history: Vec<LabeledValue>,
    forecast: Vec<LabeledValue>,
}

impl From<&ForecastResult> for ForecastTemplateData {
    fn from(result: &ForecastResult) -> Self {
        Self {
            periods: result.periods(),
            last_date: result.history_labels.last().cloned().unwrap_or_default(),
            history_count: result.history_values.len(),
            history: labeled(&result.history_labels, &result.history_values),
            forecast: labeled(&result.forecast_labels, &result.forecast_values),
        }
    }
}

#[derive(Debug, Serialize)]
struct SummaryTemplateData {
    observations: usize,
    start_date: String,
    end_date: String,
    mean: String,
    std_dev: String,
    min: String,
    max: String,
    slope: String,
    intercept: String,
}

impl From<&SeriesSummary> for SummaryTemplateData {
    fn from(summary: &SeriesSummary) -> Self {
        Self {
            observations: summary.observations,
            start_date: summary.start_date.clone(),
            end_date: summary.end_date.clone(),
            mean: fixed(summary.mean),
            std_dev: fixed(summary.std_dev),
            min: fixed(summary.min),
            max: fixed(summary.max),
            slope: summary.slope.map_or_else(|| "n/a".to_string(), |v| format!("{v:.4}")),
            intercept: summary.intercept.map_or_else(|| "n/a".to_string(), fixed),
        }
    }
}

#[derive(Debug, Serialize)]
struct EvaluationRow {
    label: String,
    actual: String,
    predicted: String,
}

#[derive(Debug, Serialize)]
struct EvaluationTemplateData {
    holdout: usize,
    rows: Vec<EvaluationRow>,
    mae: String,
    rmse: String,
    mape: String,
}

impl From<&HoldoutEvaluation> for EvaluationTemplateData {
    fn from(eval: &HoldoutEvaluation) -> Self {
        let rows = eval
            .labels
            .iter()
            .zip(eval.actual.iter().zip(&eval.predicted))
            .map(|(label, (actual, predicted))| EvaluationRow {
                label: label.clone(),
                actual: fixed(*actual),
                predicted: fixed(*predicted),
            })
            .collect();

        Self {
            holdout: eval.holdout,
            rows,
            mae: fixed(eval.mae),
            rmse: fixed(eval.rmse),
            mape: eval
                .mape
                .map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}%")),
        }
    }
}

fn fixed(value: f64) -> String {
    format!("{value:.2}")
}

fn labeled(labels: &[String], values: &[f64]) -> Vec<LabeledValue> {
    labels
        .iter()
        .zip(values)
        .map(|(label, value)| LabeledValue {
            label: label.clone(),
            value: fixed(*value),
        })
        .collect()
}

/// Renders reports in the requested [`OutputFormat`]
pub struct ReportRenderer<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> ReportRenderer<'a> {
    /// Create a renderer with the built-in text templates
    ///
    /// # Errors
    /// Returns [`Error::Render`] if a built-in template fails to compile.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        handlebars.register_template_string("forecast", FORECAST_TEMPLATE)?;
        handlebars.register_template_string("summary", SUMMARY_TEMPLATE)?;
        handlebars.register_template_string("evaluation", EVALUATION_TEMPLATE)?;

        Ok(Self { handlebars })
    }

    pub fn render_forecast(&self, result: &ForecastResult, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Text => Ok(self
                .handlebars
                .render("forecast", &ForecastTemplateData::from(result))?),
        }
    }

    pub fn render_summary(&self, summary: &SeriesSummary, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
            OutputFormat::Text => Ok(self
                .handlebars
                .render("summary", &SummaryTemplateData::from(summary))?),
        }
    }

    pub fn render_evaluation(&self, eval: &HoldoutEvaluation, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(eval)?),
            OutputFormat::Text => Ok(self
                .handlebars
                .render("evaluation", &EvaluationTemplateData::from(eval))?),
        }
    }
}
