//! Integration tests for the daily batch export

mod common;

use common::{config, context, read_csv, write_file, RecordingTransport, ADMIN, OPERATOR};
use roster_notify::core::export::{BatchExporter, ExportOutcome};
use roster_notify::domain::RosterError;
use std::sync::Arc;
use tempfile::TempDir;

const RECORDS: &str = "\
First Name,Last Name,Username,Grade,School Name,Password
Ann,Avery,aavery33,6,Delhi Middle School,Xy12!
Ben,Baker,bbaker33,6,Delhi Middle School,Qr34!
Cara,Cole,ccole38,1,Oakdale Elementary,Mn56!
Dev,Diaz,ddiaz30,9,Oak Hills High School,Op78!
";

fn export_config(data_folder: &str, extra: &str) -> String {
    format!(
        r#"
[general]
data_folder = "{data_folder}"
csv_file_headers = "Last Name, First Name, Username, Grade, School Name"

[building_secretaries]
"Delhi Middle School" = "dms.office@district.org, dms.front@district.org"
"Oak Hills High School" = "ohhs.office@district.org"

{extra}
"#
    )
}

fn setup(extra: &str) -> (TempDir, roster_notify::config::AppConfig) {
    let dir = TempDir::new().unwrap();
    let base = dir.path().to_string_lossy().replace('\\', "/");
    let config = config(&export_config(&base, extra));
    (dir, config)
}

#[tokio::test]
async fn test_one_file_per_building() {
    let (dir, config) = setup("");
    write_file(&dir.path().join("10-18-2026/StudentCreated.csv"), RECORDS);

    let transport = Arc::new(RecordingTransport::default());
    let ctx = context(config, false, transport.clone());

    let outcome = BatchExporter::new(&ctx).run_scheduled().await.unwrap();
    let ExportOutcome::Completed(summary) = outcome else {
        panic!("expected a completed run, got {outcome:?}");
    };

    assert_eq!(summary.total_records, 4);
    assert_eq!(summary.total_groups, 3);
    assert_eq!(summary.files_written, 3);
    assert_eq!(summary.records_written, 4);
    assert!(summary.is_successful());

    let out = dir.path().join("10-18-2026");
    let dms = read_csv(&out.join("DelhiMiddleSchool_students.csv"));
    let ode = read_csv(&out.join("OakdaleElementary_students.csv"));
    let ohhs = read_csv(&out.join("OakHillsHighSchool_students.csv"));
    assert_eq!(dms.len() + ode.len() + ohhs.len() - 3, 4);
}

#[tokio::test]
async fn test_columns_follow_configured_order() {
    let (dir, config) = setup("");
    write_file(&dir.path().join("10-18-2026/StudentCreated.csv"), RECORDS);

    let transport = Arc::new(RecordingTransport::default());
    let ctx = context(config, false, transport);
    BatchExporter::new(&ctx).run_scheduled().await.unwrap();

    let rows = read_csv(
        &dir.path()
            .join("10-18-2026/DelhiMiddleSchool_students.csv"),
    );
    assert_eq!(
        rows[0],
        ["Last Name", "First Name", "Username", "Grade", "School Name"]
    );
    assert_eq!(
        rows[1],
        ["Avery", "Ann", "aavery33", "6", "Delhi Middle School"]
    );
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().flatten().all(|field| !field.ends_with('!')));
}

#[tokio::test]
async fn test_secretaries_are_notified_with_attachment() {
    let (dir, config) = setup("");
    write_file(&dir.path().join("10-18-2026/StudentCreated.csv"), RECORDS);

    let transport = Arc::new(RecordingTransport::default());
    let ctx = context(config, false, transport.clone());
    let outcome = BatchExporter::new(&ctx).run_scheduled().await.unwrap();
    let ExportOutcome::Completed(summary) = outcome else {
        panic!("expected a completed run");
    };
    assert_eq!(summary.notifications_delivered, 3);

    let messages = transport.secretary_messages();
    assert_eq!(messages.len(), 3);

    let dms = messages
        .iter()
        .find(|m| m.subject().contains("Delhi Middle School"))
        .unwrap();
    assert_eq!(
        dms.subject(),
        "New Students Created for Delhi Middle School on 10-18-2026"
    );
    assert!(dms.to().contains("dms.office@district.org"));
    assert!(dms.to().contains("dms.front@district.org"));
    assert!(dms.contains("DelhiMiddleSchool_students.csv"));
    assert!(dms.contains("Please find attached the list of new students"));
    assert!(transport.escalations().is_empty());
}

#[tokio::test]
async fn test_unlisted_building_falls_back_to_administrator() {
    let (dir, config) = setup("");
    write_file(&dir.path().join("10-18-2026/StudentCreated.csv"), RECORDS);

    let transport = Arc::new(RecordingTransport::default());
    let ctx = context(config, false, transport.clone());
    BatchExporter::new(&ctx).run_scheduled().await.unwrap();

    let oakdale = transport
        .secretary_messages()
        .into_iter()
        .find(|m| m.subject().contains("Oakdale Elementary"))
        .unwrap();
    assert_eq!(oakdale.to(), ADMIN);
}

#[tokio::test]
async fn test_blank_secretary_entry_skips_notification() {
    let (dir, config) = setup("");
    let mut config = config;
    config
        .building_secretaries
        .insert("Oakdale Elementary".to_string(), " , ".to_string());
    write_file(&dir.path().join("10-18-2026/StudentCreated.csv"), RECORDS);

    let transport = Arc::new(RecordingTransport::default());
    let ctx = context(config, false, transport.clone());
    let outcome = BatchExporter::new(&ctx).run_scheduled().await.unwrap();
    let ExportOutcome::Completed(summary) = outcome else {
        panic!("expected a completed run");
    };

    assert_eq!(summary.files_written, 3);
    assert_eq!(summary.groups_skipped, 1);
    assert_eq!(summary.notifications_delivered, 2);
    assert!(dir
        .path()
        .join("10-18-2026/OakdaleElementary_students.csv")
        .is_file());
    assert!(!transport
        .messages()
        .iter()
        .any(|m| m.subject().contains("Oakdale Elementary")));
}

#[tokio::test]
async fn test_missing_source_file_writes_nothing() {
    let (dir, config) = setup("");

    let transport = Arc::new(RecordingTransport::default());
    let ctx = context(config, false, transport.clone());
    let outcome = BatchExporter::new(&ctx).run_scheduled().await.unwrap();

    assert!(matches!(outcome, ExportOutcome::NoSourceFile(_)));
    assert!(!dir.path().join("10-18-2026").exists());
    assert!(transport.messages().is_empty());
}

#[tokio::test]
async fn test_header_only_file_has_no_records() {
    let (dir, config) = setup("");
    write_file(
        &dir.path().join("10-18-2026/StudentCreated.csv"),
        "First Name,Last Name,Username,Grade,School Name\n",
    );

    let transport = Arc::new(RecordingTransport::default());
    let ctx = context(config, false, transport.clone());
    let outcome = BatchExporter::new(&ctx).run_scheduled().await.unwrap();

    assert!(matches!(outcome, ExportOutcome::NoRecords(_)));
    assert!(transport.messages().is_empty());
}

#[tokio::test]
async fn test_unset_data_folder_is_configuration_error() {
    let config = config(
        r#"
[general]
csv_file_headers = "First Name,School Name"
"#,
    );

    let transport = Arc::new(RecordingTransport::default());
    let ctx = context(config, false, transport);
    let err = BatchExporter::new(&ctx).run_scheduled().await.unwrap_err();

    assert!(matches!(err, RosterError::Configuration(_)));
}

#[tokio::test]
async fn test_missing_data_folder_is_configuration_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing").to_string_lossy().replace('\\', "/");
    let config = config(&export_config(&missing, ""));

    let transport = Arc::new(RecordingTransport::default());
    let ctx = context(config, false, transport);
    let err = BatchExporter::new(&ctx).run_scheduled().await.unwrap_err();

    assert!(err.to_string().contains("does not exist"));
}

#[tokio::test]
async fn test_unwritable_output_escalates_with_rows() {
    let (dir, config) = setup("");
    let source = dir.path().join("StudentCreated.csv");
    write_file(&source, RECORDS);
    let headers: Vec<String> = ["First Name", "School Name"]
        .iter()
        .map(|h| h.to_string())
        .collect();

    let transport = Arc::new(RecordingTransport::default());
    let ctx = context(config, false, transport.clone());
    let outcome = BatchExporter::new(&ctx)
        .run(&source, &dir.path().join("no/such/folder"), &headers)
        .await
        .unwrap();
    let ExportOutcome::Completed(summary) = outcome else {
        panic!("expected a completed run");
    };

    assert_eq!(summary.files_written, 0);
    assert_eq!(summary.groups_failed, 3);
    assert_eq!(summary.escalations_sent, 3);
    assert!(!summary.is_successful());

    let escalations = transport.escalations();
    assert_eq!(escalations.len(), 3);
    assert!(transport.secretary_messages().is_empty());

    let dms = escalations
        .iter()
        .find(|m| m.subject().contains("Delhi Middle School"))
        .unwrap();
    assert_eq!(dms.to(), OPERATOR);
    assert_eq!(dms.cc(), Some(ADMIN));
    assert!(dms.contains("batch-export"));
    assert!(dms.contains("Ann"));
    assert!(dms.contains("Ben"));
}

#[tokio::test]
async fn test_failed_send_is_escalated_and_counted() {
    let (dir, config) = setup("");
    write_file(&dir.path().join("10-18-2026/StudentCreated.csv"), RECORDS);

    let transport = Arc::new(RecordingTransport::failing());
    let ctx = context(config, false, transport);
    let outcome = BatchExporter::new(&ctx).run_scheduled().await.unwrap();
    let ExportOutcome::Completed(summary) = outcome else {
        panic!("expected a completed run");
    };

    assert_eq!(summary.files_written, 3);
    assert_eq!(summary.notifications_failed, 3);
    assert_eq!(summary.escalations_sent, 0);
    assert_eq!(summary.errors.len(), 3);
}

#[tokio::test]
async fn test_testing_mode_uses_sample_folder() {
    let dir = TempDir::new().unwrap();
    let sample = dir.path().join("sample");
    write_file(&sample.join("StudentCreated.csv"), RECORDS);

    let config = config(&format!(
        r#"
[general]
csv_file_headers = "First Name,School Name"

[testing]
sample_folder = "{}"
"#,
        sample.to_string_lossy().replace('\\', "/")
    ));

    let transport = Arc::new(RecordingTransport::default());
    let ctx = context(config, true, transport.clone());
    let exporter = BatchExporter::new(&ctx);

    let paths = exporter.resolve_paths().unwrap();
    assert_eq!(paths.source, sample.join("StudentCreated.csv"));
    assert_eq!(paths.output_dir, sample.join("10-18-2026"));
    assert!(paths.output_dir.is_dir());

    let outcome = exporter.run_scheduled().await.unwrap();
    assert!(matches!(outcome, ExportOutcome::Completed(_)));
    assert!(sample
        .join("10-18-2026/OakHillsHighSchool_students.csv")
        .is_file());
}

#[tokio::test]
async fn test_testing_mode_requires_sample_file() {
    let dir = TempDir::new().unwrap();
    let config = config(&format!(
        r#"
[testing]
sample_folder = "{}"
"#,
        dir.path().to_string_lossy().replace('\\', "/")
    ));

    let transport = Arc::new(RecordingTransport::default());
    let ctx = context(config, true, transport);
    let err = BatchExporter::new(&ctx).resolve_paths().unwrap_err();

    assert!(matches!(err, RosterError::Configuration(_)));
}
