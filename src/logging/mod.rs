//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console or rolling-file output
//! - Configurable log levels, including `critical`
//! - Optional JSON lines for file output
//!
//! # Example
//!
//! ```no_run
//! use roster_notify::logging::init_logging;
//! use roster_notify::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! roster_notify::log_critical!(reason = "no recipient", "Skipping notification");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log a critical condition
///
/// tracing has no level above ERROR, so critical events are ERROR events tagged
/// with `severity = "critical"`.
///
/// # Example
///
/// ```no_run
/// use roster_notify::log_critical;
///
/// log_critical!(template = "", "No template provided, skipping notification");
/// ```
#[macro_export]
macro_rules! log_critical {
    ($($arg:tt)+) => {
        tracing::error!(severity = "critical", $($arg)+)
    };
}

/// Log the export of one building group
///
/// # Example
///
/// ```no_run
/// use roster_notify::log_group_exported;
///
/// log_group_exported!("Oak Hills High School", 12, "/data/10-18-2026/OakHillsHighSchool_students.csv");
/// ```
#[macro_export]
macro_rules! log_group_exported {
    ($building:expr, $count:expr, $path:expr) => {
        tracing::info!(
            building = %$building,
            count = $count,
            path = %$path,
            "Exported students for building"
        );
    };
}
