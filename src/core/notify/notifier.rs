//! The notifier: the only component that sends mail
//!
//! Every message goes through [`Notifier::notify`], which validates the request,
//! renders the template, composes the message and hands it to the transport.
//! Failures never propagate; they are logged and returned as a
//! [`NotificationOutcome::Failed`].

use super::policy::EscalationPolicy;
use crate::adapters::mail::{MessageComposer, MessageTransport, OutgoingMessage};
use crate::adapters::templates::TemplateRenderer;
use crate::domain::notification::ESCALATION_TEMPLATE;
use crate::domain::{
    EscalationReport, FailureReason, FailureSource, NotificationKind, NotificationOutcome,
    NotificationRequest, Recipient,
};
use crate::log_critical;
use std::sync::Arc;

/// Result of [`Notifier::deliver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Outcome of the requested notification
    pub outcome: NotificationOutcome,

    /// Outcome of the escalation, when the failure was escalated
    pub escalation: Option<NotificationOutcome>,
}

impl Delivery {
    /// Whether an escalation reached the operator
    pub fn escalation_delivered(&self) -> bool {
        self.escalation
            .as_ref()
            .is_some_and(NotificationOutcome::is_delivered)
    }
}

/// Renders, composes and sends notifications
pub struct Notifier {
    composer: MessageComposer,
    renderer: Arc<dyn TemplateRenderer>,
    transport: Arc<dyn MessageTransport>,
    policy: EscalationPolicy,
}

impl Notifier {
    /// Creates a notifier
    pub fn new(
        composer: MessageComposer,
        renderer: Arc<dyn TemplateRenderer>,
        transport: Arc<dyn MessageTransport>,
        policy: EscalationPolicy,
    ) -> Self {
        Self {
            composer,
            renderer,
            transport,
            policy,
        }
    }

    /// The escalation policy in force
    pub fn policy(&self) -> &EscalationPolicy {
        &self.policy
    }

    /// Sends one notification
    pub async fn notify(&self, request: &NotificationRequest) -> NotificationOutcome {
        let Some(recipient) = request.recipient.as_ref() else {
            log_critical!(
                kind = %request.kind,
                subject = %request.subject,
                "No recipient provided, skipping notification"
            );
            return NotificationOutcome::Failed(FailureReason::MissingRecipient);
        };

        if request.template.trim().is_empty() {
            log_critical!(
                kind = %request.kind,
                subject = %request.subject,
                "No template provided, skipping notification"
            );
            return NotificationOutcome::Failed(FailureReason::MissingTemplate);
        }

        if let Some(attachment) = &request.attachment {
            if !attachment.is_complete() {
                log_critical!(
                    kind = %request.kind,
                    subject = %request.subject,
                    "Attachment path or file name not provided, skipping notification"
                );
                return NotificationOutcome::Failed(FailureReason::IncompleteAttachment);
            }
        }

        let outcome = self.send(request, recipient).await;
        match &outcome {
            NotificationOutcome::Delivered { message_id } => tracing::info!(
                kind = %request.kind,
                recipient = %recipient,
                subject = %request.subject,
                message_id = %message_id,
                transport = self.transport.name(),
                "Notification sent"
            ),
            NotificationOutcome::Failed(reason) => tracing::error!(
                kind = %request.kind,
                recipient = %recipient,
                subject = %request.subject,
                error = %reason,
                "Notification failed"
            ),
        }
        outcome
    }

    async fn send(
        &self,
        request: &NotificationRequest,
        recipient: &Recipient,
    ) -> NotificationOutcome {
        let html_body = match self.renderer.render(&request.template, &request.data) {
            Ok(body) => body,
            Err(e) => return NotificationOutcome::Failed(FailureReason::Render(e.to_string())),
        };

        let message = OutgoingMessage {
            to: recipient,
            cc: request.cc.as_ref(),
            subject: &request.subject,
            html_body: &html_body,
            attachment: request.attachment.as_ref(),
        };
        let encoded = match self.composer.compose(&message) {
            Ok(encoded) => encoded,
            Err(e) => return NotificationOutcome::Failed(FailureReason::Compose(e.to_string())),
        };

        match self.transport.send(&encoded).await {
            Ok(receipt) => NotificationOutcome::Delivered {
                message_id: receipt.message_id,
            },
            Err(e) => NotificationOutcome::Failed(FailureReason::Transport(e.to_string())),
        }
    }

    /// Sends a notification and escalates its failure when the policy says so
    pub async fn deliver(&self, request: &NotificationRequest) -> Delivery {
        let outcome = self.notify(request).await;

        let escalation = match &outcome {
            NotificationOutcome::Failed(reason)
                if self.policy.should_escalate(request.kind, reason) =>
            {
                // Template data may hold credentials; only the envelope is reported
                let recipient = request
                    .recipient
                    .as_ref()
                    .map(|r| r.as_str())
                    .unwrap_or_default();
                let report = EscalationReport::new(
                    FailureSource::Notification,
                    format!(
                        "{} notification to {recipient} ('{}') failed: {reason}",
                        request.kind, request.subject
                    ),
                );
                Some(self.escalate(report).await)
            }
            _ => None,
        };

        Delivery {
            outcome,
            escalation,
        }
    }

    /// Sends an error report to the operator
    ///
    /// A failed escalation is logged and never escalated again.
    pub async fn escalate(&self, report: EscalationReport) -> NotificationOutcome {
        tracing::warn!(
            source = %report.source,
            building = report.building.as_deref().unwrap_or(""),
            error = %report.error,
            "Escalating failure to operator"
        );

        let request = NotificationRequest::new(
            NotificationKind::Escalation,
            self.policy.operator.clone(),
            report.subject(),
            ESCALATION_TEMPLATE,
        )
        .with_cc(self.policy.cc.clone())
        .with_data(report.template_data());

        self.notify(&request).await
    }
}
