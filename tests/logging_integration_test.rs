//! Integration tests for logging functionality
//!
//! The global subscriber can only be installed once per process, so the
//! initialization checks live in a single test.

use kml_preprocessor::config::LoggingConfig;
use kml_preprocessor::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "/var/log/kml-preprocessor");
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_file_logging_writes_json() {
    std::env::remove_var("RUST_LOG");

    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");
    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("debug", &config).unwrap();
    assert!(log_path.is_dir());

    // A second subscriber cannot be installed
    assert!(init_logging("debug", &config).is_err());

    // Dropping the guard flushes the non-blocking writer
    drop(guard);

    let log_file = log_path.join("kml-preprocessor.log");
    let contents = std::fs::read_to_string(&log_file).unwrap();
    let first_line = contents.lines().next().expect("log file should not be empty");
    let event: serde_json::Value = serde_json::from_str(first_line).unwrap();

    assert_eq!(event["level"], "DEBUG");
    assert_eq!(event["fields"]["message"], "Logging initialized");
}
