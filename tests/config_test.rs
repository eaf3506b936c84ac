//! Tests for config module

use demandcast::config::Config;
use demandcast::parser::Delimiter;
use serial_test::serial;
use std::io::Write;

const ENV_VARS: [&str; 6] = [
    "DEMANDCAST_PERIODS",
    "DEMANDCAST_DATE_COLUMN",
    "DEMANDCAST_DEMAND_COLUMN",
    "DEMANDCAST_DELIMITER",
    "DEMANDCAST_LOG_LEVEL",
    "DEMANDCAST_LOG_FORMAT",
];

fn clear_env() {
    for var in ENV_VARS {
        std::env::remove_var(var);
    }
}

#[test]
fn test_config_file_exists() {
    let config_path = std::path::Path::new("demandcast.toml");
    assert!(
        config_path.exists(),
        "demandcast.toml should exist in project root"
    );
}

#[test]
fn test_bundled_config_matches_defaults() {
    let config = Config::from_file(std::path::Path::new("demandcast.toml"))
        .expect("Should be able to load demandcast.toml");
    assert_eq!(config, Config::default());
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_file_with_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[forecast]\nperiods = 30\n\n[input]\ndate_column = \"day\"\ndemand_column = \"units\"\ndelimiter = \"auto\""
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.forecast.periods, 30);
    assert_eq!(config.input.date_column, "day");
    assert_eq!(config.input.demand_column, "units");
    assert_eq!(config.input.delimiter, Delimiter::Auto);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_from_file_rejects_bad_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[forecast\nperiods = ").unwrap();

    let err = Config::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML config file"));
}

#[test]
fn test_from_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    let config = Config::from_env().unwrap();
    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var("DEMANDCAST_PERIODS", "21");
    std::env::set_var("DEMANDCAST_DEMAND_COLUMN", "sales");
    std::env::set_var("DEMANDCAST_DELIMITER", "tab");
    std::env::set_var("DEMANDCAST_LOG_FORMAT", "json");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.forecast.periods, 21);
    assert_eq!(config.input.date_column, "date");
    assert_eq!(config.input.demand_column, "sales");
    assert_eq!(config.input.delimiter, Delimiter::Tab);
    assert_eq!(config.logging.format, "json");
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_from_env_ignores_unparsable_values() {
    clear_env();
    std::env::set_var("DEMANDCAST_PERIODS", "fortnight");
    std::env::set_var("DEMANDCAST_DELIMITER", "colon");

    let config = Config::from_env().unwrap();
    clear_env();

    assert_eq!(config.forecast.periods, 14);
    assert_eq!(config.input.delimiter, Delimiter::Comma);
}
