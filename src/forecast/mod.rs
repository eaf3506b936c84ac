//! Linear trend forecasting
//!
//! This module provides functionality for:
//! - Fitting a least-squares trend line over observation indices
//! - Projecting the trend forward with a floor at zero
//! - Labeling future periods as consecutive days after the last observation
//! - Backtesting the projection against a held-out tail of the series

pub mod evaluation;
pub mod trend;

pub use evaluation::{evaluate_holdout, HoldoutEvaluation};
pub use trend::{TrendLine, TrendModel};

use chrono::Duration;

use crate::error::{Error, Result};
use crate::models::{ForecastResult, Series, DATE_LABEL_FORMAT};

/// Number of periods projected when none is given
pub const DEFAULT_PERIODS: usize = 14;

/// Magnitude from which every `f64` already has no fractional cents
const ROUNDING_LIMIT: f64 = 4_503_599_627_370_496.0 / 100.0;

/// Round to 2 decimal places, halves away from zero
///
/// Values too large to carry cents are returned unchanged, so scaling by 100
/// never overflows to infinity.
#[must_use]
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() || value.abs() >= ROUNDING_LIMIT {
        return value;
    }
    (value * 100.0).round() / 100.0
}

/// Clamp a projected value at zero, then round it
fn floor_and_round(value: f64) -> f64 {
    round2(value.max(0.0))
}

/// Forecaster projecting a fixed number of daily periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendForecaster {
    periods: usize,
}

impl Default for TrendForecaster {
    fn default() -> Self {
        Self {
            periods: DEFAULT_PERIODS,
        }
    }
}

impl TrendForecaster {
    /// Create a forecaster for `periods` future days
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] when `periods` is zero.
    pub fn new(periods: usize) -> Result<Self> {
        if periods < 1 {
            return Err(Error::invalid_argument("periods must be positive"));
        }
        Ok(Self { periods })
    }

    #[must_use]
    pub fn periods(&self) -> usize {
        self.periods
    }

    /// Project the series forward
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] when a forecast date falls outside
    /// the supported calendar range.
    pub fn forecast(&self, series: &Series) -> Result<ForecastResult> {
        let model = TrendModel::fit(series);
        tracing::debug!(
            observations = series.len(),
            periods = self.periods,
            model = ?model,
            "Fitted trend model"
        );

        let forecast_values = project(&model, series.len(), self.periods);

        let last = series.last().timestamp;
        let forecast_labels = (1..=self.periods)
            .map(|day| {
                last.checked_add_signed(Duration::days(day as i64))
                    .map(|ts| ts.format(DATE_LABEL_FORMAT).to_string())
                    .ok_or_else(|| {
                        Error::invalid_argument(format!(
                            "forecast date {day} day(s) after {} is out of range",
                            last.format(DATE_LABEL_FORMAT)
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ForecastResult {
            history_labels: series.observations().iter().map(|o| o.label()).collect(),
            history_values: series.observations().iter().map(|o| round2(o.value)).collect(),
            forecast_labels,
            forecast_values,
        })
    }
}

/// Floored, rounded values for indices `start..start + periods`
fn project(model: &TrendModel, start: usize, periods: usize) -> Vec<f64> {
    match model {
        TrendModel::Flat(value) => vec![floor_and_round(*value); periods],
        TrendModel::Linear(line) => (start..start + periods)
            .map(|index| floor_and_round(line.predict(index)))
            .collect(),
    }
}

/// Forecast `periods` days past the end of `series`
///
/// # Errors
/// Returns [`Error::InvalidArgument`] when `periods` is zero.
pub fn forecast(series: &Series, periods: usize) -> Result<ForecastResult> {
    TrendForecaster::new(periods)?.forecast(series)
}
