//! Common test utilities

use chrono::{Duration, NaiveDate};
use demandcast::{Observation, Series};
use std::fs;

/// Test fixture paths
#[allow(dead_code)]
pub const FIXTURES_DIR: &str = "tests/fixtures/csv";

#[allow(dead_code)]
pub fn load_fixture(filename: &str) -> String {
    let path = format!("{FIXTURES_DIR}/{filename}");
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {path}"))
}

#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Series of consecutive days starting at `start`
#[allow(dead_code)]
pub fn daily_series(start: NaiveDate, values: &[f64]) -> Series {
    let observations = values
        .iter()
        .enumerate()
        .map(|(i, &v)| Observation::on_date(start + Duration::days(i as i64), v))
        .collect();
    Series::new(observations).expect("test series must not be empty")
}

/// Render values as `date,demand` CSV text starting at `start`
#[allow(dead_code)]
pub fn daily_csv(start: NaiveDate, values: &[f64]) -> String {
    let mut csv = String::from("date,demand\n");
    for (i, value) in values.iter().enumerate() {
        let day = start + Duration::days(i as i64);
        csv.push_str(&format!("{},{value}\n", day.format("%Y-%m-%d")));
    }
    csv
}
