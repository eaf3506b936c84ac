//! Core data structures for demandcast

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::forecast::{round2, TrendModel};

/// Label format used for every date emitted by the crate
pub const DATE_LABEL_FORMAT: &str = "%Y-%m-%d";

/// A single (timestamp, demand) pair parsed from one input row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

impl Observation {
    #[must_use]
    pub fn new(timestamp: NaiveDateTime, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Observation at midnight of the given calendar date
    #[must_use]
    pub fn on_date(date: NaiveDate, value: f64) -> Self {
        Self::new(date.and_time(chrono::NaiveTime::MIN), value)
    }

    /// Calendar date of the observation
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Date label in `YYYY-MM-DD` form
    #[must_use]
    pub fn label(&self) -> String {
        self.timestamp.format(DATE_LABEL_FORMAT).to_string()
    }
}

/// Non-empty, chronologically ordered sequence of observations
///
/// The only way to build a `Series` is [`Series::new`], which sorts the
/// observations by timestamp and rejects an empty input, so every value of
/// this type is safe to hand to the forecaster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    observations: Vec<Observation>,
}

impl Series {
    /// Build a series from observations in any order
    ///
    /// Observations sharing a timestamp keep their relative input order.
    ///
    /// # Errors
    /// Returns [`Error::EmptyData`] when `observations` is empty.
    pub fn new(mut observations: Vec<Observation>) -> Result<Self> {
        if observations.is_empty() {
            return Err(Error::EmptyData { rows_read: 0 });
        }

        // `sort_by_key` is stable
        observations.sort_by_key(|o| o.timestamp);

        Ok(Self { observations })
    }

    /// Number of observations (always at least one)
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Always false; kept for API symmetry with collections
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Demand values in chronological order
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    #[must_use]
    pub fn first(&self) -> &Observation {
        &self.observations[0]
    }

    #[must_use]
    pub fn last(&self) -> &Observation {
        &self.observations[self.observations.len() - 1]
    }

    /// Split into a leading training series and the trailing `tail` observations
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] unless `1 <= tail < len()`.
    pub fn split_tail(&self, tail: usize) -> Result<(Series, &[Observation])> {
        if tail == 0 || tail >= self.len() {
            return Err(Error::invalid_argument(format!(
                "holdout must be between 1 and {} for a series of {} observations, got {tail}",
                self.len().saturating_sub(1),
                self.len()
            )));
        }

        let cut = self.len() - tail;
        let head = Series {
            observations: self.observations[..cut].to_vec(),
        };
        Ok((head, &self.observations[cut..]))
    }
}

impl IntoIterator for Series {
    type Item = Observation;
    type IntoIter = std::vec::IntoIter<Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.into_iter()
    }
}

/// Historical and projected label/value arrays for one forecast call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Observation dates as `YYYY-MM-DD`
    pub history_labels: Vec<String>,

    /// Observed values rounded to 2 decimals
    pub history_values: Vec<f64>,

    /// Future dates as `YYYY-MM-DD`, one day apart after the last observation
    pub forecast_labels: Vec<String>,

    /// Projected values floored at zero, then rounded to 2 decimals
    pub forecast_values: Vec<f64>,
}

impl ForecastResult {
    /// Number of projected periods
    #[must_use]
    pub fn periods(&self) -> usize {
        self.forecast_values.len()
    }
}

/// Descriptive statistics of a series together with its fitted trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub observations: usize,
    pub start_date: String,
    pub end_date: String,
    pub mean: f64,
    /// Sample standard deviation; zero for a single observation
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Trend slope per observation; absent when only one observation exists
    pub slope: Option<f64>,
    pub intercept: Option<f64>,
}

impl SeriesSummary {
    #[must_use]
    pub fn from_series(series: &Series) -> Self {
        let values = series.values();
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;

        let std_dev = if values.len() < 2 {
            0.0
        } else {
            let variance = values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
            variance.sqrt()
        };

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let (slope, intercept) = match TrendModel::fit(series) {
            TrendModel::Flat(_) => (None, None),
            TrendModel::Linear(line) => (Some(line.slope), Some(line.intercept)),
        };

        Self {
            observations: series.len(),
            start_date: series.first().label(),
            end_date: series.last().label(),
            mean: round2(mean),
            std_dev: round2(std_dev),
            min,
            max,
            slope,
            intercept,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(y: i32, m: u32, d: u32, value: f64) -> Observation {
        Observation::on_date(NaiveDate::from_ymd_opt(y, m, d).unwrap(), value)
    }

    #[test]
    fn test_series_rejects_empty() {
        let err = Series::new(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::EmptyData { rows_read: 0 }));
    }

    #[test]
    fn test_series_sorts_stably() {
        let series = Series::new(vec![
            obs(2024, 1, 3, 3.0),
            obs(2024, 1, 1, 1.0),
            obs(2024, 1, 3, 30.0),
            obs(2024, 1, 2, 2.0),
        ])
        .unwrap();

        assert_eq!(series.values(), vec![1.0, 2.0, 3.0, 30.0]);
        assert_eq!(series.first().label(), "2024-01-01");
        assert_eq!(series.last().label(), "2024-01-03");
    }

    #[test]
    fn test_split_tail() {
        let series = Series::new(vec![
            obs(2024, 1, 1, 1.0),
            obs(2024, 1, 2, 2.0),
            obs(2024, 1, 3, 3.0),
        ])
        .unwrap();

        let (head, tail) = series.split_tail(1).unwrap();
        assert_eq!(head.len(), 2);
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].value, 3.0);

        assert!(series.split_tail(0).is_err());
        assert!(series.split_tail(3).is_err());
    }

    #[test]
    fn test_summary_single_observation() {
        let series = Series::new(vec![obs(2024, 5, 1, 42.0)]).unwrap();
        let summary = SeriesSummary::from_series(&series);

        assert_eq!(summary.observations, 1);
        assert_eq!(summary.start_date, "2024-05-01");
        assert_eq!(summary.end_date, "2024-05-01");
        assert_eq!(summary.std_dev, 0.0);
        assert!(summary.slope.is_none());
        assert!(summary.intercept.is_none());
    }

    #[test]
    fn test_summary_statistics() {
        let series = Series::new(vec![
            obs(2024, 1, 1, 2.0),
            obs(2024, 1, 2, 4.0),
            obs(2024, 1, 3, 6.0),
        ])
        .unwrap();
        let summary = SeriesSummary::from_series(&series);

        assert_eq!(summary.mean, 4.0);
        assert_eq!(summary.std_dev, 2.0);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 6.0);
        assert!((summary.slope.unwrap() - 2.0).abs() < 1e-12);
        assert!((summary.intercept.unwrap() - 2.0).abs() < 1e-12);
    }
}
