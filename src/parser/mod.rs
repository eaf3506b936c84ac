//! Row parser for delimited demand data
//!
//! Turns raw CSV text with a header row into a validated, chronologically
//! sorted [`Series`]. The header must name the date and demand columns; every
//! data row is then parsed on its own, and rows whose date or demand cell does
//! not parse are dropped rather than aborting the import.

pub mod delimiter;
pub mod fields;

pub use delimiter::Delimiter;
pub use fields::{parse_demand, parse_timestamp};

use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::models::{Observation, Series};

/// Default name of the date column
pub const DEFAULT_DATE_COLUMN: &str = "date";

/// Default name of the demand column
pub const DEFAULT_DEMAND_COLUMN: &str = "demand";

/// Options controlling how input text is read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserOptions {
    /// Header name of the date column (case-sensitive)
    pub date_column: String,

    /// Header name of the demand column (case-sensitive)
    pub demand_column: String,

    /// Field delimiter
    pub delimiter: Delimiter,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            demand_column: DEFAULT_DEMAND_COLUMN.to_string(),
            delimiter: Delimiter::Comma,
        }
    }
}

/// Why a data row was left out of the series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The CSV reader could not decode the record
    Malformed(String),
    /// The date cell is not an ISO-8601 date
    InvalidDate(String),
    /// The demand cell is not a finite number
    InvalidDemand(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(reason) => write!(f, "malformed record: {reason}"),
            Self::InvalidDate(raw) => write!(f, "invalid date '{raw}'"),
            Self::InvalidDemand(raw) => write!(f, "invalid demand '{raw}'"),
        }
    }
}

/// A dropped data row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based line number in the input text
    pub line: usize,
    pub reason: SkipReason,
}

/// Parsed series plus diagnostics about dropped rows
#[derive(Debug, Clone)]
pub struct ParseReport {
    pub series: Series,

    /// Number of data rows seen after the header
    pub rows_read: usize,

    /// Rows excluded by the partial-tolerance policy, in input order
    pub skipped: Vec<SkippedRow>,
}

impl ParseReport {
    /// Number of rows that made it into the series
    #[must_use]
    pub fn rows_kept(&self) -> usize {
        self.series.len()
    }
}

/// Column positions resolved from the header row
struct Columns {
    date: usize,
    demand: usize,
}

/// Row parser configured with column names and delimiter
#[derive(Debug, Clone, Default)]
pub struct RowParser {
    options: ParserOptions,
}

impl RowParser {
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse `text` into a series and a report of skipped rows
    ///
    /// # Errors
    /// - [`Error::Schema`] when the header lacks the date or demand column
    /// - [`Error::EmptyData`] when no data row survives parsing
    /// - [`Error::Csv`] when the header row itself cannot be read
    pub fn parse(&self, text: &str) -> Result<ParseReport> {
        let delimiter = self.options.delimiter.resolve(text);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter.as_byte())
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let columns = self.resolve_columns(&headers)?;

        let mut observations = Vec::new();
        let mut skipped = Vec::new();
        let mut rows_read = 0usize;

        for (idx, result) in reader.records().enumerate() {
            rows_read += 1;

            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    let line = e.position().map_or(idx + 2, |p| p.line() as usize);
                    skipped.push(SkippedRow {
                        line,
                        reason: SkipReason::Malformed(e.to_string()),
                    });
                    continue;
                }
            };

            let line = record.position().map_or(idx + 2, |p| p.line() as usize);

            match parse_row(&record, &columns) {
                Ok(observation) => observations.push(observation),
                Err(reason) => {
                    tracing::debug!(line, reason = %reason, "Skipping row");
                    skipped.push(SkippedRow { line, reason });
                }
            }
        }

        tracing::debug!(
            rows_read,
            rows_kept = observations.len(),
            rows_skipped = skipped.len(),
            delimiter = %delimiter,
            "Parsed demand rows"
        );

        if observations.is_empty() {
            return Err(Error::EmptyData { rows_read });
        }

        Ok(ParseReport {
            series: Series::new(observations)?,
            rows_read,
            skipped,
        })
    }

    fn resolve_columns(&self, headers: &StringRecord) -> Result<Columns> {
        let header_map = build_header_map(headers);

        let date = header_map.get(self.options.date_column.as_str()).copied();
        let demand = header_map.get(self.options.demand_column.as_str()).copied();

        match (date, demand) {
            (Some(date), Some(demand)) => Ok(Columns { date, demand }),
            _ => {
                let required = [&self.options.date_column, &self.options.demand_column];
                let missing = required
                    .iter()
                    .filter(|name| !header_map.contains_key(name.as_str()))
                    .map(|name| name.to_string())
                    .collect::<Vec<_>>();
                Err(Error::schema(required.map(|name| name.clone()), missing))
            }
        }
    }
}

/// Map header names to column positions; a repeated name resolves to its last position
fn build_header_map(headers: &StringRecord) -> HashMap<&str, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim_start_matches('\u{feff}'), idx))
        .collect()
}

fn parse_row(record: &StringRecord, columns: &Columns) -> std::result::Result<Observation, SkipReason> {
    let raw_date = record.get(columns.date).unwrap_or("");
    let timestamp =
        parse_timestamp(raw_date).ok_or_else(|| SkipReason::InvalidDate(raw_date.to_string()))?;

    let raw_demand = record.get(columns.demand).unwrap_or("");
    let value =
        parse_demand(raw_demand).ok_or_else(|| SkipReason::InvalidDemand(raw_demand.to_string()))?;

    Ok(Observation::new(timestamp, value))
}

/// Parse CSV text with a `date,demand` header into a sorted series
///
/// # Errors
/// See [`RowParser::parse`].
pub fn parse(text: &str) -> Result<Series> {
    RowParser::default().parse(text).map(|report| report.series)
}

/// Parse with explicit options, keeping the skipped-row report
///
/// # Errors
/// See [`RowParser::parse`].
pub fn parse_with(text: &str, options: &ParserOptions) -> Result<ParseReport> {
    RowParser::new(options.clone()).parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let series = parse("date,demand\n2024-01-02,5\n2024-01-01,4\n").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.values(), vec![4.0, 5.0]);
        assert_eq!(series.first().label(), "2024-01-01");
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let err = parse("date,sales\n2024-01-01,4\n").unwrap_err();
        match err {
            Error::Schema { missing, .. } => assert_eq!(missing, vec!["demand".to_string()]),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_header_names_are_case_sensitive() {
        let err = parse("Date,Demand\n2024-01-01,4\n").unwrap_err();
        match err {
            Error::Schema { missing, .. } => assert_eq!(missing.len(), 2),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_text_is_schema_error() {
        assert!(matches!(parse("").unwrap_err(), Error::Schema { .. }));
    }

    #[test]
    fn test_header_only_is_empty_data() {
        let err = parse("date,demand\n").unwrap_err();
        assert!(matches!(err, Error::EmptyData { rows_read: 0 }));
    }

    #[test]
    fn test_skipped_rows_are_reported() {
        let text = "date,demand\n2024-01-01,4\nnot-a-date,5\n2024-01-03,abc\n2024-01-04,7\n";
        let report = parse_with(text, &ParserOptions::default()).unwrap();

        assert_eq!(report.rows_read, 4);
        assert_eq!(report.rows_kept(), 2);
        assert_eq!(
            report.skipped,
            vec![
                SkippedRow {
                    line: 3,
                    reason: SkipReason::InvalidDate("not-a-date".to_string()),
                },
                SkippedRow {
                    line: 4,
                    reason: SkipReason::InvalidDemand("abc".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_short_row_is_skipped() {
        let report = parse_with(
            "date,demand\n2024-01-01\n2024-01-02,3\n",
            &ParserOptions::default(),
        )
        .unwrap();
        assert_eq!(report.rows_kept(), 1);
        assert_eq!(report.skipped.len(), 1);
    }

    #[test]
    fn test_custom_columns_and_delimiter() {
        let options = ParserOptions {
            date_column: "day".to_string(),
            demand_column: "units".to_string(),
            delimiter: Delimiter::Auto,
        };
        let report = parse_with("store;day;units\nA;2024-01-01;3\nB;2024-01-02;4\n", &options).unwrap();
        assert_eq!(report.series.values(), vec![3.0, 4.0]);
    }

    #[test]
    fn test_bom_on_first_header_is_ignored() {
        let series = parse("\u{feff}date,demand\n2024-01-01,4\n").unwrap();
        assert_eq!(series.len(), 1);
    }
}
