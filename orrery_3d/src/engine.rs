/// Orrery3D Engine - global logger slot
///
/// The scene graph, camera rig and application context are plain owned
/// values. The only process-wide state is the logger used by the
/// `engine_*!` macros, stored behind a `RwLock` so a host can swap it
/// at any time.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

fn logger_slot() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::default())))
}

/// Static facade over the global logger
///
/// # Example
///
/// ```no_run
/// use orrery_3d::orrery3d::{Engine, log::{DefaultLogger, LogSeverity}};
///
/// // Show per-frame trace output in the demo
/// Engine::set_logger(DefaultLogger::with_min_severity(LogSeverity::Trace));
/// ```
pub struct Engine;

impl Engine {
    /// Replace the current logger with a custom implementation
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_slot().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset the logger to `DefaultLogger::default()`
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_slot().write() {
            *lock = Box::new(DefaultLogger::default());
        }
    }

    /// Log without file:line (used by engine_trace! .. engine_warn!)
    ///
    /// # Arguments
    ///
    /// * `severity` - Log severity level
    /// * `source` - Source module (e.g., "orrery3d::SceneGraph")
    /// * `message` - Log message
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = logger_slot().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Log with file:line information (used by engine_error!)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = logger_slot().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
