//! Notification requests, outcomes and escalation reports

use super::recipient::Recipient;
use chrono::{DateTime, Local};
use serde_json::{json, Map, Value};
use std::fmt;
use std::path::PathBuf;

/// Template for the per-building batch summary (sent with the CSV attached)
pub const BATCH_SUMMARY_TEMPLATE: &str = "new_students_email_template.html";

/// Template for a successful credential reset
pub const RESET_SUCCESS_TEMPLATE: &str = "password_reset_email_template.html";

/// Template for operator escalations
pub const ESCALATION_TEMPLATE: &str = "error_notification_template.html";

/// What a notification is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// Per-building batch summary to a secretary
    BatchSummary,
    /// New credentials to a secretary
    ResetSuccess,
    /// Error report to the operator
    Escalation,
}

impl NotificationKind {
    /// Whether the message goes to building staff rather than the operator
    pub fn is_secretary_facing(&self) -> bool {
        !matches!(self, NotificationKind::Escalation)
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NotificationKind::BatchSummary => "batch-summary",
            NotificationKind::ResetSuccess => "reset-success",
            NotificationKind::Escalation => "escalation",
        };
        f.write_str(name)
    }
}

/// A file to attach, addressed by directory and file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRef {
    /// Directory containing the file
    pub dir: PathBuf,

    /// File name, also used as the attachment name in the message
    pub filename: String,
}

impl AttachmentRef {
    /// Creates a new attachment reference
    pub fn new(dir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            filename: filename.into(),
        }
    }

    /// Whether both parts are present
    pub fn is_complete(&self) -> bool {
        !self.dir.as_os_str().is_empty() && !self.filename.trim().is_empty()
    }

    /// Full path of the file
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.filename)
    }
}

/// Everything the notifier needs to send one message
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    /// Purpose of the message
    pub kind: NotificationKind,

    /// Primary recipient; `None` is rejected by the notifier
    pub recipient: Option<Recipient>,

    /// Optional carbon copy
    pub cc: Option<Recipient>,

    /// Subject line
    pub subject: String,

    /// Template name; empty is rejected by the notifier
    pub template: String,

    /// Data handed to the template, and nothing else
    pub data: Value,

    /// Optional file attachment
    pub attachment: Option<AttachmentRef>,
}

impl NotificationRequest {
    /// Creates a request with an empty data mapping and no cc or attachment
    pub fn new(
        kind: NotificationKind,
        recipient: Option<Recipient>,
        subject: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            recipient,
            cc: None,
            subject: subject.into(),
            template: template.into(),
            data: Value::Object(Map::new()),
            attachment: None,
        }
    }

    /// Sets the carbon copy recipient
    pub fn with_cc(mut self, cc: Option<Recipient>) -> Self {
        self.cc = cc;
        self
    }

    /// Sets the template data
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    /// Attaches a file
    pub fn with_attachment(mut self, attachment: AttachmentRef) -> Self {
        self.attachment = Some(attachment);
        self
    }
}

/// Why a notification was not delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// No recipient was given
    MissingRecipient,
    /// No template name was given
    MissingTemplate,
    /// An attachment was requested without both path and file name
    IncompleteAttachment,
    /// The template could not be rendered
    Render(String),
    /// The message could not be built or the attachment could not be read
    Compose(String),
    /// The transport refused or failed to send
    Transport(String),
}

impl FailureReason {
    /// Whether the failure comes from a malformed request rather than the environment
    ///
    /// Malformed requests are programming errors: logged critical, never escalated.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            FailureReason::MissingRecipient
                | FailureReason::MissingTemplate
                | FailureReason::IncompleteAttachment
        )
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::MissingRecipient => f.write_str("no recipient provided"),
            FailureReason::MissingTemplate => f.write_str("no template provided"),
            FailureReason::IncompleteAttachment => {
                f.write_str("attachment path or file name not provided")
            }
            FailureReason::Render(e) => write!(f, "template rendering failed: {e}"),
            FailureReason::Compose(e) => write!(f, "message composition failed: {e}"),
            FailureReason::Transport(e) => write!(f, "send failed: {e}"),
        }
    }
}

/// Result of one notification attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// The transport accepted the message
    Delivered {
        /// Identifier reported by the transport
        message_id: String,
    },
    /// The message was not sent
    Failed(FailureReason),
}

impl NotificationOutcome {
    /// Whether the message was delivered
    pub fn is_delivered(&self) -> bool {
        matches!(self, NotificationOutcome::Delivered { .. })
    }
}

/// Stage of the run that produced an escalated failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureSource {
    /// Writing a building's export file
    BatchExport,
    /// Sending a secretary-facing notification
    Notification,
    /// Looking up the secretary for a reset
    ResetRecipient,
    /// Running the reset tool
    ResetInvoke,
    /// Decoding the reset tool output
    ResetDecode,
    /// The reset tool reported a failure
    ResetReported,
}

impl FailureSource {
    /// Tag included in escalation emails
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureSource::BatchExport => "batch-export",
            FailureSource::Notification => "notification",
            FailureSource::ResetRecipient => "password-reset:recipient",
            FailureSource::ResetInvoke => "password-reset:invoke",
            FailureSource::ResetDecode => "password-reset:decode",
            FailureSource::ResetReported => "password-reset:reported",
        }
    }
}

impl fmt::Display for FailureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content of an operator escalation email
#[derive(Debug, Clone)]
pub struct EscalationReport {
    /// Stage that failed
    pub source: FailureSource,

    /// Raw error text
    pub error: String,

    /// Building involved, if any
    pub building: Option<String>,

    /// Column names for `rows`
    pub headers: Vec<String>,

    /// Records that were not written
    pub rows: Vec<Vec<String>>,

    /// When the failure was observed
    pub timestamp: DateTime<Local>,
}

impl EscalationReport {
    /// Creates a report stamped with the current local time
    pub fn new(source: FailureSource, error: impl Into<String>) -> Self {
        Self {
            source,
            error: error.into(),
            building: None,
            headers: Vec::new(),
            rows: Vec::new(),
            timestamp: Local::now(),
        }
    }

    /// Names the building involved
    pub fn with_building(mut self, building: impl Into<String>) -> Self {
        self.building = Some(building.into());
        self
    }

    /// Lists the records that were not written
    pub fn with_rows(mut self, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        self.headers = headers;
        self.rows = rows;
        self
    }

    /// Subject line for the escalation email
    pub fn subject(&self) -> String {
        match &self.building {
            Some(building) => format!("[roster-notify] {} failure for {building}", self.source),
            None => format!("[roster-notify] {} failure", self.source),
        }
    }

    /// Data mapping for the escalation template
    pub fn template_data(&self) -> Value {
        json!({
            "source": self.source.as_str(),
            "error": self.error,
            "timestamp": self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            "building": self.building,
            "headers": self.headers,
            "rows": self.rows,
        })
    }
}
