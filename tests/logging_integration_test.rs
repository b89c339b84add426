//! Integration tests for logging functionality
//!
//! A process can install only one global subscriber, so the file test also covers
//! the second-install error.

use roster_notify::config::{LogType, LoggingConfig};
use roster_notify::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert_eq!(config.log_type, LogType::File);
    assert_eq!(config.local_path, "logs");
    assert_eq!(config.file_name, "roster-notify.log");
    assert_eq!(config.local_rotation, "daily");
    assert!(!config.json);
}

#[test]
fn test_invalid_level_is_rejected_before_install() {
    let err = init_logging("loud", &LoggingConfig::default()).err().unwrap();
    assert!(err.to_string().contains("Invalid log level"));
}

#[test]
fn test_file_logging_writes_json_lines() {
    let temp_dir = TempDir::new().unwrap();
    let log_dir = temp_dir.path().join("logs");

    let config = LoggingConfig {
        log_type: LogType::File,
        local_path: log_dir.to_string_lossy().into_owned(),
        file_name: "run.log".to_string(),
        local_rotation: "never".to_string(),
        json: true,
    };

    let guard = init_logging("debug", &config).unwrap();
    assert!(log_dir.is_dir());

    let second = init_logging("debug", &config);
    assert!(second.is_err());

    drop(guard);

    let contents = std::fs::read_to_string(log_dir.join("run.log")).unwrap();
    assert!(contents.contains("Logging initialized"));
    assert!(contents.lines().all(|line| line.starts_with('{')));
}
