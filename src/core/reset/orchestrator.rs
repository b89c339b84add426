//! Credential reset and notification
//!
//! One reset runs through `Invoking -> Parsing -> {Success, Failure} -> Notified`.
//! A successful reset is sent to the building secretary; every failure goes to the
//! operator instead. The secretary never hears about a failed reset.

use crate::adapters::reset_tool::ResetTool;
use crate::core::context::AppContext;
use crate::core::notify::Delivery;
use crate::domain::notification::RESET_SUCCESS_TEMPLATE;
use crate::domain::{
    BuildingCode, EscalationReport, FailureSource, NotificationKind, NotificationOutcome,
    NotificationRequest, Recipient, ResetResult, Username,
};
use secrecy::ExposeSecret;
use serde_json::json;
use zeroize::Zeroize;

/// How a reset ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The new credentials were handed to the notifier
    Notified(Delivery),

    /// The reset failed and the operator was told
    Escalated {
        /// Stage that failed
        source: FailureSource,
        /// Error text sent to the operator
        error: String,
        /// Outcome of the escalation email
        escalation: NotificationOutcome,
    },
}

/// Result of one reset request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetReport {
    /// Account the tool was run for
    pub username: Username,

    /// Building the reset was reported for
    pub building: BuildingCode,

    /// What happened
    pub outcome: ResetOutcome,
}

impl ResetReport {
    /// Whether the secretary received the new credentials
    pub fn is_notified(&self) -> bool {
        matches!(&self.outcome, ResetOutcome::Notified(d) if d.outcome.is_delivered())
    }
}

/// Runs resets and routes their results
pub struct CredentialResetOrchestrator<'a> {
    ctx: &'a AppContext,
    tool: &'a dyn ResetTool,
}

impl<'a> CredentialResetOrchestrator<'a> {
    /// Creates an orchestrator
    pub fn new(ctx: &'a AppContext, tool: &'a dyn ResetTool) -> Self {
        Self { ctx, tool }
    }

    /// Resets one account and notifies the secretary or the operator
    ///
    /// In test mode the canned identity replaces `username` and `building` before
    /// anything else happens.
    pub async fn reset_and_notify(
        &self,
        username: Username,
        building: BuildingCode,
    ) -> ResetReport {
        let (username, building) = match &self.ctx.testing {
            Some(identity) => {
                tracing::info!(
                    requested_username = %username,
                    requested_building = %building,
                    username = %identity.username,
                    building = %identity.building,
                    "Test mode: using canned reset identity"
                );
                (identity.username.clone(), identity.building)
            }
            None => (username, building),
        };

        tracing::info!(username = %username, building = %building, "Resetting password");
        let outcome = self.run(&username, building).await;

        ResetReport {
            username,
            building,
            outcome,
        }
    }

    async fn run(&self, username: &Username, building: BuildingCode) -> ResetOutcome {
        let display = building.display_name();

        let Some(recipient) = self.ctx.directory.resolve(display) else {
            return self
                .escalate(
                    FailureSource::ResetRecipient,
                    building,
                    format!(
                        "No secretary or administrator address for {display}; \
                         reset of {username} not attempted"
                    ),
                )
                .await;
        };

        let mut payload = match self.tool.reset(username).await {
            Ok(payload) => payload,
            Err(e) => {
                return self
                    .escalate(
                        FailureSource::ResetInvoke,
                        building,
                        format!("Password reset for {username} failed: {e}"),
                    )
                    .await
            }
        };

        let decoded = ResetResult::decode(&payload);
        // The payload holds the new password in clear text
        payload.zeroize();

        match decoded {
            Err(e) => {
                self.escalate(
                    FailureSource::ResetDecode,
                    building,
                    format!("Password reset for {username} failed: {e}"),
                )
                .await
            }
            Ok(ResetResult::Failure { diagnostic }) => {
                self.escalate(
                    FailureSource::ResetReported,
                    building,
                    format!("Password reset for {username} failed: {diagnostic}"),
                )
                .await
            }
            Ok(ResetResult::Success {
                display_name,
                password,
            }) => {
                tracing::info!(username = %username, "Password reset successfully");

                let request = NotificationRequest::new(
                    NotificationKind::ResetSuccess,
                    Some(recipient),
                    format!("Password Reset for {display_name}"),
                    RESET_SUCCESS_TEMPLATE,
                )
                .with_cc(self.success_cc())
                .with_data(json!({
                    "Fullname": display_name,
                    "Username": username.as_str(),
                    "Password": password.expose_secret(),
                    "Building": display,
                }));

                ResetOutcome::Notified(self.ctx.notifier.deliver(&request).await)
            }
        }
    }

    fn success_cc(&self) -> Option<Recipient> {
        let admin = &self.ctx.config.admin;
        if self.ctx.is_testing() {
            Recipient::parse(&admin.sysadmin)
        } else {
            Recipient::parse(admin.admin_email())
        }
    }

    async fn escalate(
        &self,
        source: FailureSource,
        building: BuildingCode,
        error: String,
    ) -> ResetOutcome {
        tracing::error!(
            source = %source,
            building = %building,
            error = %error,
            "Password reset failed"
        );

        let report =
            EscalationReport::new(source, error.clone()).with_building(building.display_name());
        let escalation = self.ctx.notifier.escalate(report).await;

        ResetOutcome::Escalated {
            source,
            error,
            escalation,
        }
    }
}
