//! Sink configuration from YAML files and the environment.

use std::fs;

use namedlog::{Error, ErrorKind, Level, LogMessage, OutputFormat, Sink, SinkConfig, LEVEL_ENV};
use serial_test::serial;
use tempfile::TempDir;

#[test]
fn loads_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("json.yaml");
    fs::write(&path, "min_level: debug\nformat: json\nmessages: false\n").unwrap();

    let config = SinkConfig::from_path(&path).unwrap();
    assert_eq!(config.min_level, Level::Debug);
    assert_eq!(config.format, OutputFormat::Json);
    assert!(!config.messages);
    assert!(config.event_ids);
}

#[test]
fn file_levels_accept_any_case() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("loud.yaml");
    fs::write(&path, "min_level: CRIT\n").unwrap();

    let config = SinkConfig::from_path(&path).unwrap();
    assert_eq!(config.min_level, Level::Critical);
}

#[test]
fn missing_file_is_an_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = SinkConfig::from_path(temp_dir.path().join("missing.yaml")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn invalid_yaml_is_a_config_error() {
    let err = SinkConfig::from_yaml("format: [").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
#[serial]
fn env_overrides_min_level() {
    std::env::set_var(LEVEL_ENV, "ERROR");
    let config = SinkConfig::from_yaml("min_level: trace\n")
        .unwrap()
        .with_env()
        .unwrap();
    std::env::remove_var(LEVEL_ENV);
    assert_eq!(config.min_level, Level::Error);
}

#[test]
#[serial]
fn env_without_variable_keeps_file_value() {
    std::env::remove_var(LEVEL_ENV);
    let mut config = SinkConfig::from_yaml("min_level: warn\n").unwrap();
    config.apply_env().unwrap();
    assert_eq!(config.min_level, Level::Warn);
}

#[test]
#[serial]
fn env_with_unknown_level_fails() {
    std::env::set_var(LEVEL_ENV, "shouting");
    let result = SinkConfig::default().with_env();
    std::env::remove_var(LEVEL_ENV);
    assert!(matches!(result, Err(Error::InvalidLevel(ref s)) if s == "shouting"));
}

#[test]
fn built_sink_logs_messages() {
    let config = SinkConfig::from_yaml("min_level: warn\n").unwrap();
    let sink = config.build(std::io::sink());
    assert!(!sink.is_enabled(Level::Info));

    let message = LogMessage::<(u8,)>::define(Level::Warn, 1, "{n}", &[]).unwrap();
    message.log(&sink, (1,), None);
}
