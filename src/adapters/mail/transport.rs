//! Message transport abstraction
//!
//! The notifier is the only caller. Transports receive a fully composed, encoded
//! message and report whether the provider accepted it.

use super::composer::EncodedMessage;
use crate::domain::TransportError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

/// Provider acknowledgement for a sent message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Identifier assigned by the provider
    pub message_id: String,
}

/// Sends encoded messages
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Sends one message
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the provider could not be reached or refused
    /// the message.
    async fn send(&self, message: &EncodedMessage) -> Result<DeliveryReceipt, TransportError>;

    /// Short name used in log lines
    fn name(&self) -> &'static str;
}

/// Logs messages instead of sending them
#[derive(Debug, Default)]
pub struct DryRunTransport {
    sent: AtomicU64,
}

impl DryRunTransport {
    /// Creates a new dry-run transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages "sent" so far
    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl MessageTransport for DryRunTransport {
    async fn send(&self, message: &EncodedMessage) -> Result<DeliveryReceipt, TransportError> {
        let n = self.sent.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            size = message.size,
            "Dry run: message composed but not sent"
        );
        Ok(DeliveryReceipt {
            message_id: format!("dry-run-{n}"),
        })
    }

    fn name(&self) -> &'static str {
        "dry-run"
    }
}
