//! Password reset command implementation
//!
//! This module implements `--reset-password`, which resets one student account and
//! sends the new credentials to the building secretary.

use crate::adapters::reset_tool::ProcessResetTool;
use crate::core::context::AppContext;
use crate::core::reset::{CredentialResetOrchestrator, ResetOutcome};
use crate::domain::{BuildingCode, NotificationOutcome, Username};
use clap::Args;

/// Arguments for the password reset command
#[derive(Args, Debug, Default)]
pub struct ResetArgs {
    /// Reset a student's password instead of running the batch export
    #[arg(short = 'r', long = "reset-password", requires_all = ["username", "building"])]
    pub reset_password: bool,

    /// Username of the student to reset
    #[arg(short, long, requires = "reset_password")]
    pub username: Option<Username>,

    /// Building code (OHHS, BMS, DMS, RRMS, COH, DES, JFD, ODE, SES, OHOA)
    #[arg(short, long, requires = "reset_password")]
    pub building: Option<BuildingCode>,
}

impl ResetArgs {
    /// Execute the password reset command
    ///
    /// Every reset outcome exits 0; failures have already been escalated.
    pub async fn execute(&self, ctx: &AppContext) -> anyhow::Result<i32> {
        let (Some(username), Some(building)) = (&self.username, self.building) else {
            eprintln!("--reset-password requires --username and --building");
            return Ok(1);
        };

        let tool = ProcessResetTool::from_config(&ctx.config.reset);
        let report = CredentialResetOrchestrator::new(ctx, &tool)
            .reset_and_notify(username.clone(), building)
            .await;

        match &report.outcome {
            ResetOutcome::Notified(delivery) => match &delivery.outcome {
                NotificationOutcome::Delivered { .. } => println!(
                    "Password for {} reset; credentials sent to the {} secretary",
                    report.username,
                    report.building.display_name()
                ),
                NotificationOutcome::Failed(reason) => println!(
                    "Password for {} reset, but the notification failed: {reason}",
                    report.username
                ),
            },
            ResetOutcome::Escalated { source, error, .. } => {
                println!("Password reset for {} failed ({source}): {error}", report.username)
            }
        }

        Ok(0)
    }
}
