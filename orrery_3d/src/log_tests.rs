//! Unit tests for log.rs
//!
//! Tests Logger trait, LogEntry, LogSeverity, formatting, and DefaultLogger filtering.

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, format_entry};
use std::time::SystemTime;

fn entry(severity: LogSeverity, message: &str) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "orrery3d::Test".to_string(),
        message: message.to_string(),
        file: None,
        line: None,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_labels_are_fixed_width() {
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        assert_eq!(severity.label().len(), 5);
    }
    assert_eq!(LogSeverity::Warn.label(), "WARN ");
}

// ============================================================================
// FORMAT TESTS
// ============================================================================

#[test]
fn test_format_entry_without_location() {
    let line = format_entry(&entry(LogSeverity::Info, "camera fitted"));
    assert!(line.contains("[INFO ] [orrery3d::Test] camera fitted"));
    assert!(!line.ends_with(')'));
}

#[test]
fn test_format_entry_with_location() {
    let mut e = entry(LogSeverity::Error, "cycle rejected");
    e.file = Some("scene_graph.rs");
    e.line = Some(42);

    let line = format_entry(&e);
    assert!(line.contains("[ERROR]"));
    assert!(line.ends_with("cycle rejected (scene_graph.rs:42)"));
}

#[test]
fn test_format_entry_requires_both_file_and_line() {
    let mut e = entry(LogSeverity::Warn, "partial location");
    e.file = Some("app.rs");

    let line = format_entry(&e);
    assert!(line.ends_with("partial location"));
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_starts_at_info() {
    let logger = DefaultLogger::default();
    assert_eq!(logger.min_severity(), LogSeverity::Info);
    assert!(!logger.accepts(LogSeverity::Trace));
    assert!(!logger.accepts(LogSeverity::Debug));
    assert!(logger.accepts(LogSeverity::Info));
    assert!(logger.accepts(LogSeverity::Error));
}

#[test]
fn test_default_logger_with_min_severity() {
    let logger = DefaultLogger::with_min_severity(LogSeverity::Trace);
    assert!(logger.accepts(LogSeverity::Trace));

    let quiet = DefaultLogger::with_min_severity(LogSeverity::Error);
    assert!(!quiet.accepts(LogSeverity::Warn));
}

#[test]
fn test_default_logger_all_severities() {
    let logger = DefaultLogger::with_min_severity(LogSeverity::Trace);

    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        // Just verify it doesn't panic, with and without location
        logger.log(&entry(severity, "message"));

        let mut located = entry(severity, "message with location");
        located.file = Some("test.rs");
        located.line = Some(7);
        logger.log(&located);
    }
}

// ============================================================================
// LOGGER TRAIT TESTS
// ============================================================================

struct CountingLogger {
    count: std::sync::Mutex<usize>,
}

impl Logger for CountingLogger {
    fn log(&self, _entry: &LogEntry) {
        *self.count.lock().unwrap() += 1;
    }
}

#[test]
fn test_custom_logger_implementation() {
    let logger = CountingLogger { count: std::sync::Mutex::new(0) };

    logger.log(&entry(LogSeverity::Info, "one"));
    logger.log(&entry(LogSeverity::Trace, "two"));

    assert_eq!(*logger.count.lock().unwrap(), 2);
}

#[test]
fn test_logger_trait_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DefaultLogger>();
}
