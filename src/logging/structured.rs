//! Structured logging setup using tracing
//!
//! Logs go either to the console or to a rolling file, never both. The file writer is
//! non-blocking; keep the returned [`LoggingGuard`] alive until the process exits so
//! buffered lines are flushed.

use crate::config::{LogType, LoggingConfig};
use crate::domain::{Result, RosterError};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Guard that must be kept alive for the duration of the program
/// to ensure logs are flushed properly
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    fn new(file_guard: Option<WorkerGuard>) -> Self {
        Self {
            _file_guard: file_guard,
        }
    }
}

/// Initialize the logging system based on configuration
///
/// # Arguments
///
/// * `log_level_str` - Log level (trace, debug, info, warn, error, critical)
/// * `config` - Logging configuration
///
/// # Errors
///
/// Returns a configuration error for an unknown level, an unknown rotation, or a log
/// directory that cannot be created.
///
/// # Example
///
/// ```no_run
/// use roster_notify::logging::init_logging;
/// use roster_notify::config::LoggingConfig;
///
/// let config = LoggingConfig::default();
/// let _guard = init_logging("info", &config).expect("Failed to initialize logging");
/// ```
pub fn init_logging(log_level_str: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let log_level = parse_log_level(log_level_str)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("roster_notify={}", log_level)));

    let (layer, file_guard) = match config.log_type {
        LogType::Console => {
            let layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_filter(env_filter)
                .boxed();
            (layer, None)
        }
        LogType::File => {
            std::fs::create_dir_all(&config.local_path).map_err(|e| {
                RosterError::Configuration(format!(
                    "Failed to create log directory {}: {}",
                    config.local_path, e
                ))
            })?;

            let rotation = parse_rotation(&config.local_rotation)?;
            let file_appender =
                RollingFileAppender::new(rotation, &config.local_path, &config.file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            let layer = if config.json {
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(non_blocking)
                    .with_filter(env_filter)
                    .boxed()
            } else {
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(non_blocking)
                    .with_filter(env_filter)
                    .boxed()
            };
            (layer, Some(guard))
        }
    };

    tracing_subscriber::registry().with(layer).try_init().map_err(|e| {
        RosterError::Configuration(format!("Failed to install log subscriber: {e}"))
    })?;

    tracing::debug!(
        log_type = ?config.log_type,
        local_path = %config.local_path,
        level = %log_level,
        "Logging initialized"
    );

    Ok(LoggingGuard::new(file_guard))
}

/// Parse log level from string
///
/// `critical` has no tracing equivalent and maps to ERROR.
pub(crate) fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" | "critical" => Ok(Level::ERROR),
        _ => Err(RosterError::Configuration(format!(
            "Invalid log level: {}. Must be one of: trace, debug, info, warn, error, critical",
            level_str
        ))),
    }
}

fn parse_rotation(rotation: &str) -> Result<Rotation> {
    match rotation {
        "daily" => Ok(Rotation::DAILY),
        "hourly" => Ok(Rotation::HOURLY),
        "never" => Ok(Rotation::NEVER),
        other => Err(RosterError::Configuration(format!(
            "Invalid log rotation: {other}. Must be one of: daily, hourly, never"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level_valid() {
        assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
        assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
        assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
        assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
    }

    #[test]
    fn test_parse_log_level_python_style_names() {
        assert_eq!(parse_log_level("WARNING").unwrap(), Level::WARN);
        assert_eq!(parse_log_level("CRITICAL").unwrap(), Level::ERROR);
        assert_eq!(parse_log_level("Info").unwrap(), Level::INFO);
    }

    #[test]
    fn test_parse_log_level_invalid() {
        assert!(parse_log_level("invalid").is_err());
        assert!(parse_log_level("").is_err());
    }

    #[test]
    fn test_parse_rotation() {
        assert!(parse_rotation("daily").is_ok());
        assert!(parse_rotation("never").is_ok());
        assert!(parse_rotation("weekly").is_err());
    }

    #[test]
    fn test_logging_guard_creation() {
        let guard = LoggingGuard::new(None);
        drop(guard);
    }
}
