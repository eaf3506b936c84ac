//! Holdout backtesting of the trend forecast

use serde::{Deserialize, Serialize};

use super::TrendForecaster;
use crate::error::Result;
use crate::models::Series;

/// Accuracy of the trend forecast on the trailing observations of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldoutEvaluation {
    /// Number of trailing observations held out
    pub holdout: usize,

    /// Dates of the held-out observations
    pub labels: Vec<String>,

    /// Observed values of the held-out observations
    pub actual: Vec<f64>,

    /// Forecast values for the same positions (floored and rounded)
    pub predicted: Vec<f64>,

    /// Mean absolute error
    pub mae: f64,

    /// Root mean squared error
    pub rmse: f64,

    /// Mean absolute percentage error over non-zero actuals, in percent
    pub mape: Option<f64>,
}

/// Fit on all but the last `holdout` observations and score the projection
///
/// The projection is positional: the i-th forecast value is compared with
/// the i-th held-out observation regardless of calendar gaps.
///
/// # Errors
/// Returns [`crate::error::Error::InvalidArgument`] unless
/// `1 <= holdout < series.len()`.
pub fn evaluate_holdout(series: &Series, holdout: usize) -> Result<HoldoutEvaluation> {
    let (train, tail) = series.split_tail(holdout)?;
    let result = TrendForecaster::new(holdout)?.forecast(&train)?;

    let actual: Vec<f64> = tail.iter().map(|o| o.value).collect();
    let predicted = result.forecast_values;

    let errors: Vec<f64> = actual
        .iter()
        .zip(&predicted)
        .map(|(a, p)| a - p)
        .collect();
    let n = errors.len() as f64;

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let rmse = (errors.iter().map(|e| e * e).sum::<f64>() / n).sqrt();

    let ratios: Vec<f64> = actual
        .iter()
        .zip(&errors)
        .filter(|(a, _)| **a != 0.0)
        .map(|(a, e)| (e / a).abs())
        .collect();
    let mape = if ratios.is_empty() {
        None
    } else {
        Some(ratios.iter().sum::<f64>() / ratios.len() as f64 * 100.0)
    };

    tracing::debug!(
        train = train.len(),
        holdout,
        mae,
        rmse,
        mape = ?mape,
        "Evaluated holdout"
    );

    Ok(HoldoutEvaluation {
        holdout,
        labels: tail.iter().map(|o| o.label()).collect(),
        actual,
        predicted,
        mae,
        rmse,
        mape,
    })
}
