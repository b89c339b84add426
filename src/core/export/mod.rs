//! Batch export
//!
//! This module provides the daily export of new student records:
//! - Reading the record file and grouping it by building
//! - Writing one CSV per building and notifying its secretary
//! - Summary and reporting

pub mod exporter;
pub mod summary;

pub use exporter::{read_records, BatchExporter, ExportOutcome, ExportPaths};
pub use summary::{ExportError, ExportErrorType, ExportSummary};
