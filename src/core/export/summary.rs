//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting batch export results.

use std::fmt;
use std::time::Duration;

/// Summary of one batch export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Date label of the export folder
    pub date: String,

    /// Records read from the source file
    pub total_records: usize,

    /// Distinct buildings found
    pub total_groups: usize,

    /// Per-building files written completely
    pub files_written: usize,

    /// Records written to per-building files
    pub records_written: usize,

    /// Secretary notifications delivered
    pub notifications_delivered: usize,

    /// Secretary notifications that failed
    pub notifications_failed: usize,

    /// Groups skipped because no recipient could be resolved
    pub groups_skipped: usize,

    /// Groups abandoned because their file could not be written
    pub groups_failed: usize,

    /// Escalations delivered to the operator
    pub escalations_sent: usize,

    /// Duration of the run
    pub duration: Duration,

    /// Errors encountered during export
    pub errors: Vec<ExportError>,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            total_records: 0,
            total_groups: 0,
            files_written: 0,
            records_written: 0,
            notifications_delivered: 0,
            notifications_failed: 0,
            groups_skipped: 0,
            groups_failed: 0,
            escalations_sent: 0,
            duration: Duration::from_secs(0),
            errors: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// Whether every group was written and notified
    pub fn is_successful(&self) -> bool {
        self.errors.is_empty()
            && self.notifications_failed == 0
            && self.files_written == self.total_groups
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            date = %self.date,
            total_records = self.total_records,
            buildings = self.total_groups,
            files_written = self.files_written,
            records_written = self.records_written,
            notifications_delivered = self.notifications_delivered,
            notifications_failed = self.notifications_failed,
            groups_skipped = self.groups_skipped,
            groups_failed = self.groups_failed,
            escalations_sent = self.escalations_sent,
            duration_ms = self.duration.as_millis() as u64,
            "Batch export completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Batch export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = %error.error_type,
                    building = %error.building,
                    message = %error.message,
                    "Export error"
                );
            }
        }
    }
}

/// Type of export error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportErrorType {
    /// No usable recipient for the building
    Recipient,
    /// The building's file could not be written
    RecordFile,
    /// The building's notification was not delivered
    Notification,
}

impl fmt::Display for ExportErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportErrorType::Recipient => "recipient",
            ExportErrorType::RecordFile => "record-file",
            ExportErrorType::Notification => "notification",
        };
        f.write_str(name)
    }
}

/// Export error tied to one building
#[derive(Debug, Clone)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Building the error belongs to
    pub building: String,

    /// Error message
    pub message: String,
}

impl ExportError {
    /// Create a new export error
    pub fn new(
        error_type: ExportErrorType,
        building: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error_type,
            building: building.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Export for {}", self.date)?;
        writeln!(f, "  Records read:             {}", self.total_records)?;
        writeln!(f, "  Buildings:                {}", self.total_groups)?;
        writeln!(f, "  Files written:            {}", self.files_written)?;
        writeln!(f, "  Notifications delivered:  {}", self.notifications_delivered)?;
        writeln!(f, "  Notifications failed:     {}", self.notifications_failed)?;
        writeln!(f, "  Buildings skipped:        {}", self.groups_skipped)?;
        writeln!(f, "  Buildings failed:         {}", self.groups_failed)?;
        write!(f, "  Escalations sent:         {}", self.escalations_sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_summary_creation() {
        let summary = ExportSummary::new("10-18-2026");

        assert_eq!(summary.date, "10-18-2026");
        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.files_written, 0);
        assert_eq!(summary.duration, Duration::from_secs(0));
        assert!(summary.errors.is_empty());
        assert!(summary.is_successful());
    }

    #[test]
    fn test_export_summary_with_duration() {
        let summary = ExportSummary::new("d").with_duration(Duration::from_secs(3));
        assert_eq!(summary.duration, Duration::from_secs(3));
    }

    #[test]
    fn test_export_summary_is_successful() {
        let mut summary = ExportSummary::new("d");
        summary.total_groups = 2;
        summary.files_written = 2;
        summary.notifications_delivered = 2;
        assert!(summary.is_successful());

        summary.notifications_failed = 1;
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_export_summary_add_error() {
        let mut summary = ExportSummary::new("d");
        summary.add_error(ExportError::new(
            ExportErrorType::RecordFile,
            "Delhi Middle School",
            "No space left on device",
        ));

        assert_eq!(summary.errors.len(), 1);
        assert_eq!(summary.errors[0].error_type, ExportErrorType::RecordFile);
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_export_summary_display() {
        let mut summary = ExportSummary::new("10-18-2026");
        summary.total_records = 7;
        let text = summary.to_string();
        assert!(text.contains("Export for 10-18-2026"));
        assert!(text.contains("Records read:             7"));
    }
}
