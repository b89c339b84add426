//! Export command implementation
//!
//! This module implements the default command: the daily export of new student
//! records, one file and one email per building.

use crate::core::context::AppContext;
use crate::core::export::{BatchExporter, ExportOutcome};
use crate::domain::{EscalationReport, FailureSource, RosterError};
use crate::log_critical;

/// The batch export command
#[derive(Debug, Default, Clone, Copy)]
pub struct ExportCommand;

impl ExportCommand {
    /// Execute the export command
    ///
    /// Exits 0 when the run completes or there is nothing to do, and 1 on a
    /// configuration problem or an unreadable record file.
    pub async fn execute(&self, ctx: &AppContext) -> anyhow::Result<i32> {
        tracing::info!(
            date = %ctx.date_label(),
            testing = ctx.is_testing(),
            "Starting batch export"
        );

        match BatchExporter::new(ctx).run_scheduled().await {
            Ok(ExportOutcome::NoSourceFile(path)) => {
                println!("No new student file at {}", path.display());
                Ok(0)
            }
            Ok(ExportOutcome::NoRecords(path)) => {
                println!("No new student records in {}", path.display());
                Ok(0)
            }
            Ok(ExportOutcome::Completed(summary)) => {
                println!("{summary}");
                Ok(0)
            }
            Err(RosterError::Configuration(msg)) => {
                log_critical!(error = %msg, "Batch export cannot start");
                eprintln!("Configuration error: {msg}");
                Ok(1)
            }
            Err(e) => {
                tracing::error!(error = %e, "Batch export failed");
                ctx.notifier
                    .escalate(EscalationReport::new(FailureSource::BatchExport, e.to_string()))
                    .await;
                eprintln!("Export failed: {e}");
                Ok(1)
            }
        }
    }
}
