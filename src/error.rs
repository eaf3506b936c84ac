//! Unified error handling for the demandcast crate
//!
//! Every fallible operation in the library returns [`Result`], whose error side
//! is the [`Error`] enum below. Malformed individual CSV rows are *not* errors:
//! the parser drops them and records them in its report instead.
//!
//! # Usage
//!
//! ```rust
//! use demandcast::error::{DemandcastErrorTrait, Error, ErrorCategory};
//!
//! let err = Error::invalid_argument("periods must be positive");
//! assert_eq!(err.category(), ErrorCategory::Argument);
//! assert!(!err.is_recoverable());
//! ```

use std::io;
use thiserror::Error;

/// Common trait for demandcast error types
pub trait DemandcastErrorTrait: std::error::Error {
    /// Check if this error is recoverable (can be retried without changing input)
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The input text itself is unusable (schema or content)
    Input,
    /// A caller passed an out-of-range argument
    Argument,
    /// Reading input or writing output failed
    Storage,
    /// Configuration loading and validation errors
    Config,
    /// Rendering a report failed
    Output,
}

impl ErrorCategory {
    /// Get a short human-readable description for the category
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Input => "input error",
            Self::Argument => "invalid argument",
            Self::Storage => "storage error",
            Self::Config => "configuration error",
            Self::Output => "output error",
        }
    }
}

/// Unified error type for the demandcast crate
#[derive(Error, Debug)]
pub enum Error {
    /// Required columns are missing from the header row
    #[error("CSV must include {} column(s); missing: {}", .required.join(" and "), .missing.join(", "))]
    Schema {
        required: Vec<String>,
        missing: Vec<String>,
    },

    /// No data rows survived parsing
    #[error("No valid rows found after parsing date and demand ({rows_read} data row(s) read)")]
    EmptyData { rows_read: usize },

    /// Caller passed an invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// CSV reader errors that prevent reading the header row
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Report template registration or rendering errors
    #[error("Render error: {0}")]
    Render(String),
}

impl DemandcastErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true, // I/O errors are often transient
            Self::Schema { .. }
            | Self::EmptyData { .. }
            | Self::InvalidArgument(_)
            | Self::Csv(_)
            | Self::Json(_)
            | Self::Config(_)
            | Self::Render(_) => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Schema { .. } | Self::EmptyData { .. } | Self::Csv(_) => ErrorCategory::Input,
            Self::InvalidArgument(_) => ErrorCategory::Argument,
            Self::Io(_) => ErrorCategory::Storage,
            Self::Config(_) => ErrorCategory::Config,
            Self::Json(_) | Self::Render(_) => ErrorCategory::Output,
        }
    }
}

impl Error {
    /// Create a schema error for the given required and missing columns
    pub fn schema<R, M>(required: R, missing: M) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        Self::Schema {
            required: required.into_iter().map(Into::into).collect(),
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

// Conversions from handlebars errors
impl From<handlebars::TemplateError> for Error {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::Render(err.to_string())
    }
}

impl From<handlebars::RenderError> for Error {
    fn from(err: handlebars::RenderError) -> Self {
        Self::Render(err.to_string())
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
