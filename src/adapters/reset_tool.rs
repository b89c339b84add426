//! External credential reset tool
//!
//! The tool is run as `<command> <args...> -username <username>` and its stdout is
//! returned untouched. Decoding the output is not this module's concern.

use crate::config::ResetConfig;
use crate::domain::{ResetToolError, Username};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Runs a credential reset for one account
#[async_trait]
pub trait ResetTool: Send + Sync {
    /// Resets the password of `username` and returns the tool's raw stdout
    ///
    /// # Errors
    ///
    /// Returns a [`ResetToolError`] if the tool cannot be started, runs past its time
    /// bound, or writes something other than UTF-8.
    async fn reset(&self, username: &Username) -> Result<String, ResetToolError>;
}

/// Reset tool run as a child process
#[derive(Debug, Clone)]
pub struct ProcessResetTool {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessResetTool {
    /// Creates a tool runner
    pub fn new(command: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            args,
            timeout,
        }
    }

    /// Creates a tool runner from the `[reset]` section
    pub fn from_config(config: &ResetConfig) -> Self {
        Self::new(
            config.command.clone(),
            config.args.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }
}

#[async_trait]
impl ResetTool for ProcessResetTool {
    async fn reset(&self, username: &Username) -> Result<String, ResetToolError> {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            .arg("-username")
            .arg(username.as_str())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        tracing::info!(command = %self.command, username = %username, "Running reset tool");

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Err(_) => {
                return Err(ResetToolError::Timeout {
                    timeout: self.timeout,
                })
            }
            Ok(Err(e)) => {
                return Err(ResetToolError::Spawn {
                    command: self.command.clone(),
                    reason: e.to_string(),
                })
            }
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            // The payload on stdout still decides the outcome
            tracing::warn!(
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "Reset tool exited unsuccessfully"
            );
        }

        String::from_utf8(output.stdout).map_err(|e| ResetToolError::InvalidOutput(e.to_string()))
    }
}
