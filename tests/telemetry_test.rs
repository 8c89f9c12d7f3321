//! Logging configuration tests.

use std::path::PathBuf;

use ledge::telemetry::{LogConfig, LogError, LogFormat};
use ledge::{Sink, Stream, TracingSink};

// =============================================================================
// LogConfig Tests
// =============================================================================

#[test]
fn log_config_default_is_pretty_info() {
    let config = LogConfig::default();
    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.level, "info");
    assert!(config.output_path.is_none());
}

#[test]
fn log_config_json_with_output_path() {
    let config = LogConfig {
        format: LogFormat::Json,
        level: "ledge=trace".to_string(),
        output_path: Some(PathBuf::from("/tmp/ledge.log")),
    };
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.output_path, Some(PathBuf::from("/tmp/ledge.log")));
}

#[test]
fn log_format_equality() {
    assert_eq!(LogFormat::default(), LogFormat::Pretty);
    assert_ne!(LogFormat::Json, LogFormat::Pretty);
}

// =============================================================================
// LogError Tests
// =============================================================================

#[test]
fn log_error_invalid_filter_display() {
    let error = LogError::InvalidFilter("bad filter".to_string());
    assert!(error.to_string().contains("Invalid log filter"));
    assert!(error.to_string().contains("bad filter"));
}

#[test]
fn log_error_file_open_display() {
    let error = LogError::FileOpen("permission denied".to_string());
    assert!(error.to_string().contains("Failed to open log file"));
    assert!(error.to_string().contains("permission denied"));
}

#[test]
fn log_error_already_initialized_display() {
    let error = LogError::AlreadyInitialized;
    assert!(error.to_string().contains("already initialized"));
}

// =============================================================================
// TracingSink Tests
// =============================================================================

#[test]
fn tracing_sink_accepts_both_streams() {
    // No subscriber installed: events are dropped.
    TracingSink.emit(Stream::Out, "out");
    TracingSink.emit(Stream::Err, "err");
}

// =============================================================================
// Subscriber Tests
// =============================================================================

// The only test in this binary that installs a global subscriber.
#[test]
fn init_logging_json_file_captures_sink_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledge.json");
    let config = LogConfig {
        format: LogFormat::Json,
        level: "info".to_string(),
        output_path: Some(path.clone()),
    };

    ledge::telemetry::init_logging(&config).unwrap();
    TracingSink.emit(Stream::Err, "captured line");

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("captured line"));
    assert!(written.contains("ledge::sink"));

    let again = ledge::telemetry::init_logging(&LogConfig::default());
    assert!(matches!(again, Err(LogError::AlreadyInitialized)));
}
