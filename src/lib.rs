//! demandcast - short-horizon linear demand forecasting
//!
//! Reads a time-stamped demand series from CSV text, fits a least-squares
//! trend line over the observations and projects it forward day by day, with
//! projected values floored at zero.
//!
//! # Architecture
//!
//! - [`parser`] - CSV rows to a validated, chronologically sorted [`Series`]
//! - [`forecast`] - Trend fitting, projection and holdout evaluation
//! - [`models`] - Core data structures and types
//! - [`report`] - JSON and text rendering of results
//! - [`config`] - Configuration management and settings
//! - [`error`] - Unified error type
//!
//! # Example
//!
//! ```
//! use demandcast::{forecast, parser};
//!
//! let csv = "date,demand\n2024-01-01,10\n2024-01-02,12\n2024-01-03,14\n";
//! let series = parser::parse(csv)?;
//! let result = forecast::forecast(&series, 2)?;
//!
//! assert_eq!(result.forecast_labels, vec!["2024-01-04", "2024-01-05"]);
//! assert_eq!(result.forecast_values, vec![16.0, 18.0]);
//! # Ok::<(), demandcast::error::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod forecast;
pub mod models;
pub mod parser;
pub mod report;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{DemandcastErrorTrait, Error, ErrorCategory, Result};
    pub use crate::forecast::{evaluate_holdout, forecast, HoldoutEvaluation, TrendForecaster};
    pub use crate::models::{ForecastResult, Observation, Series, SeriesSummary};
    pub use crate::parser::{parse, parse_with, Delimiter, ParserOptions, RowParser};
    pub use crate::report::{OutputFormat, ReportRenderer};
}

// Direct re-exports for convenience
pub use models::{ForecastResult, Observation, Series, SeriesSummary};
