//! Escalation policy
//!
//! Decides which failed notifications are reported to the operator and where those
//! reports go.

use crate::config::AppConfig;
use crate::domain::{FailureReason, NotificationKind, Recipient};

/// Who receives escalations, and which failures produce one
#[derive(Debug, Clone)]
pub struct EscalationPolicy {
    /// Primary escalation recipient
    pub operator: Option<Recipient>,

    /// Carbon copy on escalations
    pub cc: Option<Recipient>,

    /// Escalate render, compose and transport failures of secretary-facing mail
    pub escalate_transport_failures: bool,
}

impl EscalationPolicy {
    /// Builds the policy from configuration
    ///
    /// Escalations go to `admin.sysadmin`. Outside test mode the administrator is
    /// copied when it is a different address.
    pub fn from_config(config: &AppConfig, testing: bool) -> Self {
        let operator = Recipient::parse(&config.admin.sysadmin);
        let admin = Recipient::parse(config.admin.admin_email());
        let cc = if testing || admin == operator {
            None
        } else {
            admin
        };

        Self {
            operator,
            cc,
            escalate_transport_failures: config.notifications.escalate_transport_failures,
        }
    }

    /// Whether a failed notification should be escalated
    ///
    /// Malformed requests are never escalated, and neither is a failed escalation.
    pub fn should_escalate(&self, kind: NotificationKind, reason: &FailureReason) -> bool {
        if !kind.is_secretary_facing() || reason.is_request_error() {
            return false;
        }
        self.escalate_transport_failures
    }
}
