//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use roster_notify::adapters::mail::{DeliveryReceipt, EncodedMessage, MessageTransport};
use roster_notify::adapters::reset_tool::ResetTool;
use roster_notify::adapters::templates::HandlebarsRenderer;
use roster_notify::config::AppConfig;
use roster_notify::core::context::AppContext;
use roster_notify::domain::{ResetToolError, TransportError, Username};
use chrono::NaiveDate;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const SENDER: &str = "notify@district.org";
pub const OPERATOR: &str = "ops@district.org";
pub const ADMIN: &str = "principal@district.org";

/// A message as the transport saw it, with folded headers joined back up
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub text: String,
}

impl SentMessage {
    fn header(&self, name: &str) -> Option<&str> {
        let prefix = format!("{name}: ");
        self.text
            .split("\r\n\r\n")
            .next()?
            .lines()
            .find_map(|line| line.strip_prefix(prefix.as_str()))
    }

    pub fn to(&self) -> &str {
        self.header("To").unwrap_or("")
    }

    pub fn cc(&self) -> Option<&str> {
        self.header("Cc")
    }

    pub fn subject(&self) -> &str {
        self.header("Subject").unwrap_or("")
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }
}

/// Transport that keeps every message in memory
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<SentMessage>>,
    fail: bool,
}

impl RecordingTransport {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn messages(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Messages addressed to the operator
    pub fn escalations(&self) -> Vec<SentMessage> {
        self.messages()
            .into_iter()
            .filter(|m| m.subject().starts_with("[roster-notify]"))
            .collect()
    }

    /// Messages addressed to secretaries
    pub fn secretary_messages(&self) -> Vec<SentMessage> {
        self.messages()
            .into_iter()
            .filter(|m| !m.subject().starts_with("[roster-notify]"))
            .collect()
    }
}

#[async_trait]
impl MessageTransport for RecordingTransport {
    async fn send(&self, message: &EncodedMessage) -> Result<DeliveryReceipt, TransportError> {
        if self.fail {
            return Err(TransportError::Request("connection refused".to_string()));
        }

        let raw = String::from_utf8(message.decode().unwrap()).unwrap();
        let mut sent = self.sent.lock().unwrap();
        sent.push(SentMessage {
            text: raw.replace("\r\n ", " ").replace("\r\n\t", " "),
        });
        Ok(DeliveryReceipt {
            message_id: format!("rec-{}", sent.len()),
        })
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Reset tool answering every call with the same result
pub struct ScriptedResetTool {
    response: Mutex<Option<Result<String, ResetToolError>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedResetTool {
    pub fn replying(payload: &str) -> Self {
        Self {
            response: Mutex::new(Some(Ok(payload.to_string()))),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ResetToolError) -> Self {
        Self {
            response: Mutex::new(Some(Err(error))),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResetTool for ScriptedResetTool {
    async fn reset(&self, username: &Username) -> Result<String, ResetToolError> {
        self.calls.lock().unwrap().push(username.as_str().to_string());
        self.response
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok("failure\r\nscript exhausted".to_string()))
    }
}

/// Configuration with the district's usual addresses and the given extra TOML
pub fn config(extra: &str) -> AppConfig {
    let toml = format!(
        r#"
[admin]
service_account_email = "{SENDER}"
sysadmin = "{OPERATOR}"
admin_email = "{ADMIN}"

[transport]
provider = "dry-run"

{extra}
"#
    );
    toml::from_str(&toml).unwrap()
}

/// Context around a recording transport, pinned to 2026-10-18
pub fn context(config: AppConfig, testing: bool, transport: Arc<RecordingTransport>) -> AppContext {
    AppContext::with_collaborators(
        config,
        testing,
        Arc::new(HandlebarsRenderer::with_defaults().unwrap()),
        transport,
    )
    .unwrap()
    .with_run_date(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
}

pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

pub fn read_csv(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}
