//! Batch export of new student records
//!
//! Reads the daily record file, writes one CSV per building, and notifies each
//! building's secretary with its file attached.

use super::summary::{ExportError, ExportErrorType, ExportSummary};
use crate::core::context::AppContext;
use crate::domain::notification::BATCH_SUMMARY_TEMPLATE;
use crate::domain::{
    export_file_name, group_by_building, AttachmentRef, BuildingGroup, EscalationReport,
    FailureSource, NotificationKind, NotificationOutcome, NotificationRequest, Record, Result,
    RosterError,
};
use crate::log_group_exported;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// How a batch run ended
#[derive(Debug, Clone)]
pub enum ExportOutcome {
    /// No record file for the run date
    NoSourceFile(PathBuf),
    /// The record file has no data rows
    NoRecords(PathBuf),
    /// Groups were processed
    Completed(ExportSummary),
}

/// Where a run reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    /// The daily record file
    pub source: PathBuf,
    /// Folder receiving the per-building files
    pub output_dir: PathBuf,
}

/// Exports records grouped by building
pub struct BatchExporter<'a> {
    ctx: &'a AppContext,
}

impl<'a> BatchExporter<'a> {
    /// Creates an exporter
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    /// Resolves the source file and output folder for the run date
    ///
    /// In test mode the sample folder is used and its date folder is created.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the data folder is unset or missing, or if
    /// the test sample file is missing.
    pub fn resolve_paths(&self) -> Result<ExportPaths> {
        let general = &self.ctx.config.general;
        let date = self.ctx.date_label();

        if self.ctx.is_testing() {
            let sample = Path::new(&self.ctx.config.testing.sample_folder);
            let output_dir = sample.join(&date);
            std::fs::create_dir_all(&output_dir).map_err(|e| {
                RosterError::Configuration(format!(
                    "Failed to create test output folder {}: {e}",
                    output_dir.display()
                ))
            })?;

            let source = sample.join(&general.source_file_name);
            if !source.is_file() {
                return Err(RosterError::Configuration(format!(
                    "Sample file does not exist: {}",
                    source.display()
                )));
            }
            return Ok(ExportPaths { source, output_dir });
        }

        let base = general.data_folder().ok_or_else(|| {
            RosterError::Configuration("general.data_folder is not configured".to_string())
        })?;
        let base = Path::new(base);
        if !base.is_dir() {
            return Err(RosterError::Configuration(format!(
                "Data folder does not exist: {}",
                base.display()
            )));
        }

        let output_dir = base.join(&date);
        Ok(ExportPaths {
            source: output_dir.join(&general.source_file_name),
            output_dir,
        })
    }

    /// Resolves paths and headers from configuration and runs the export
    pub async fn run_scheduled(&self) -> Result<ExportOutcome> {
        let paths = self.resolve_paths()?;
        let headers = self.ctx.config.general.headers().ok_or_else(|| {
            RosterError::Configuration("general.csv_file_headers is not configured".to_string())
        })?;
        self.run(&paths.source, &paths.output_dir, &headers).await
    }

    /// Runs the export
    ///
    /// Per-building failures are logged, escalated and counted; they never stop the
    /// run. Only an unreadable source file is returned as an error.
    pub async fn run(
        &self,
        source: &Path,
        output_dir: &Path,
        headers: &[String],
    ) -> Result<ExportOutcome> {
        let start = Instant::now();

        if !source.is_file() {
            tracing::info!(path = %source.display(), "No new student file for this date");
            return Ok(ExportOutcome::NoSourceFile(source.to_path_buf()));
        }

        let records = read_records(source)?;
        if records.is_empty() {
            tracing::info!(path = %source.display(), "No new student records found");
            return Ok(ExportOutcome::NoRecords(source.to_path_buf()));
        }

        let date = self.ctx.date_label();
        let mut summary = ExportSummary::new(&date);
        summary.total_records = records.len();

        let groups = group_by_building(records, &self.ctx.config.general.building_column);
        summary.total_groups = groups.len();
        tracing::info!(
            records = summary.total_records,
            buildings = summary.total_groups,
            path = %source.display(),
            "Read new student records"
        );

        for group in &groups {
            self.export_group(group, output_dir, headers, &date, &mut summary)
                .await;
        }

        let summary = summary.with_duration(start.elapsed());
        summary.log_summary();
        Ok(ExportOutcome::Completed(summary))
    }

    async fn export_group(
        &self,
        group: &BuildingGroup,
        output_dir: &Path,
        headers: &[String],
        date: &str,
        summary: &mut ExportSummary,
    ) {
        let file_name = export_file_name(&group.building);
        let path = output_dir.join(&file_name);

        if let Err(e) = write_group(&path, headers, &group.records) {
            tracing::error!(
                building = %group.building,
                path = %path.display(),
                error = %e,
                "Failed to write building file"
            );
            summary.groups_failed += 1;
            summary.add_error(ExportError::new(
                ExportErrorType::RecordFile,
                &group.building,
                e.to_string(),
            ));

            let rows = group
                .records
                .iter()
                .map(|r| r.project(headers).map(str::to_string).collect())
                .collect();
            let report = EscalationReport::new(FailureSource::BatchExport, e.to_string())
                .with_building(&group.building)
                .with_rows(headers.to_vec(), rows);
            if self.ctx.notifier.escalate(report).await.is_delivered() {
                summary.escalations_sent += 1;
            }
            return;
        }

        summary.files_written += 1;
        summary.records_written += group.len();
        log_group_exported!(group.building, group.len(), path.display());

        let Some(recipient) = self.ctx.directory.resolve(&group.building) else {
            tracing::error!(
                building = %group.building,
                "No recipient for building, skipping notification"
            );
            summary.groups_skipped += 1;
            summary.add_error(ExportError::new(
                ExportErrorType::Recipient,
                &group.building,
                "no secretary or administrator address",
            ));
            return;
        };

        let request = NotificationRequest::new(
            NotificationKind::BatchSummary,
            Some(recipient),
            format!("New Students Created for {} on {date}", group.building),
            BATCH_SUMMARY_TEMPLATE,
        )
        .with_data(json!({
            "building": group.building,
            "date": date,
            "count": group.len(),
            "message": format!(
                "Please find attached the list of new students created for {} on {date}.",
                group.building
            ),
        }))
        .with_attachment(AttachmentRef::new(output_dir, file_name));

        let delivery = self.ctx.notifier.deliver(&request).await;
        if delivery.outcome.is_delivered() {
            summary.notifications_delivered += 1;
        } else {
            summary.notifications_failed += 1;
            if let NotificationOutcome::Failed(reason) = &delivery.outcome {
                summary.add_error(ExportError::new(
                    ExportErrorType::Notification,
                    &group.building,
                    reason.to_string(),
                ));
            }
        }
        if delivery.escalation_delivered() {
            summary.escalations_sent += 1;
        }
    }
}

/// Reads every data row of a record file
pub fn read_records(path: &Path) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| RosterError::RecordFile(format!("{}: {e}", path.display())))?;

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        records.push(Record::new(headers.iter().cloned().zip(row.iter())));
    }
    Ok(records)
}

/// Writes one building file
///
/// The writer buffers rows, so none of them is on disk until the final flush
/// succeeds. A failed group is reported with all of its records.
fn write_group(path: &Path, headers: &[String], records: &[Record]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(headers)?;
    for record in records {
        writer.write_record(record.project(headers))?;
    }
    writer.flush()?;
    Ok(())
}
