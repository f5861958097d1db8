//! Unit tests for the Engine logger facade
//!
//! IMPORTANT: LOGGER is a global OnceLock shared across all tests.
//! All tests are marked with #[serial] to run sequentially.

use crate::orrery3d::Engine;
use crate::orrery3d::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<String>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        // Unrelated tests running in parallel may log through the global slot
        if entry.source != "orrery3d::Test" {
            return;
        }
        let location = match (entry.file, entry.line) {
            (Some(_), Some(line)) => format!(" @{}", line),
            _ => String::new(),
        };
        self.entries.lock().unwrap().push(
            format!("{:?} {}: {}{}", entry.severity, entry.source, entry.message, location)
        );
    }
}

// ============================================================================
// LOGGING API TESTS
// ============================================================================

#[test]
#[serial]
fn test_set_logger_receives_log() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    Engine::log(LogSeverity::Info, "orrery3d::Test", "hello".to_string());

    let entries = entries.lock().unwrap().clone();
    assert_eq!(entries, vec!["Info orrery3d::Test: hello".to_string()]);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_log_detailed_carries_location() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    Engine::log_detailed(LogSeverity::Error, "orrery3d::Test", "boom".to_string(), "x.rs", 12);

    let entries = entries.lock().unwrap().clone();
    assert_eq!(entries, vec!["Error orrery3d::Test: boom @12".to_string()]);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_macros_route_through_engine() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    crate::engine_trace!("orrery3d::Test", "t={}", 1);
    crate::engine_debug!("orrery3d::Test", "d");
    crate::engine_info!("orrery3d::Test", "i");
    crate::engine_warn!("orrery3d::Test", "w");
    crate::engine_error!("orrery3d::Test", "e");

    let entries = entries.lock().unwrap().clone();
    assert_eq!(entries.len(), 5);
    assert!(entries[0].starts_with("Trace orrery3d::Test: t=1"));
    assert!(entries[3].starts_with("Warn"));
    assert!(entries[4].starts_with("Error orrery3d::Test: e @"));

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_reset_logger_detaches_custom_logger() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);
    Engine::reset_logger();

    Engine::log(LogSeverity::Warn, "orrery3d::Test", "after reset".to_string());

    assert!(entries.lock().unwrap().is_empty());
}
