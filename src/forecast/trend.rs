//! Ordinary least-squares trend over observation indices

use serde::{Deserialize, Serialize};

use crate::models::Series;

/// Fitted line `value = slope * index + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    /// Fit a line to `values` sampled at indices `0..values.len()`
    ///
    /// Calendar gaps between observations are not modeled; the values are
    /// treated as equally spaced. A zero index variance yields a flat line
    /// through the mean.
    #[must_use]
    pub fn fit(values: &[f64]) -> Self {
        let n = values.len() as f64;
        if values.is_empty() {
            return Self {
                slope: 0.0,
                intercept: 0.0,
            };
        }

        let index_mean = (n - 1.0) / 2.0;
        let value_mean = values.iter().sum::<f64>() / n;

        let numerator: f64 = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64 - index_mean) * (v - value_mean))
            .sum();
        let denominator: f64 = (0..values.len())
            .map(|i| (i as f64 - index_mean).powi(2))
            .sum();

        let slope = if denominator == 0.0 {
            0.0
        } else {
            numerator / denominator
        };

        Self {
            slope,
            intercept: value_mean - slope * index_mean,
        }
    }

    /// Raw fitted value at `index`
    #[must_use]
    pub fn predict(&self, index: usize) -> f64 {
        self.slope * index as f64 + self.intercept
    }
}

/// Model fitted to a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TrendModel {
    /// Single observation: no trend can be fitted, the value is repeated
    Flat(f64),
    /// Two or more observations
    Linear(TrendLine),
}

impl TrendModel {
    #[must_use]
    pub fn fit(series: &Series) -> Self {
        let values = series.values();
        match values.as_slice() {
            [only] => Self::Flat(*only),
            _ => Self::Linear(TrendLine::fit(&values)),
        }
    }

    /// Raw (unfloored, unrounded) value at observation index `index`
    #[must_use]
    pub fn predict(&self, index: usize) -> f64 {
        match self {
            Self::Flat(value) => *value,
            Self::Linear(line) => line.predict(index),
        }
    }
}
