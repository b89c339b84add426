//! Outbound mail
//!
//! - [`composer`] builds and encodes MIME messages
//! - [`transport`] defines the [`MessageTransport`] seam and the dry-run transport
//! - [`gmail`] sends through the Gmail REST API

pub mod composer;
pub mod gmail;
pub mod transport;

pub use composer::{EncodedMessage, MessageComposer, OutgoingMessage};
pub use gmail::GmailTransport;
pub use transport::{DeliveryReceipt, DryRunTransport, MessageTransport};

use crate::config::{AppConfig, TransportProvider};
use crate::domain::{Result, RosterError};
use std::sync::Arc;

/// Builds the transport selected by configuration
///
/// Dry-run mode always wins over the configured provider.
pub fn create_transport(config: &AppConfig) -> Result<Arc<dyn MessageTransport>> {
    if config.is_dry_run() {
        return Ok(Arc::new(DryRunTransport::new()));
    }

    match config.transport.provider {
        TransportProvider::Gmail => {
            let gmail = config.gmail.clone().ok_or_else(|| {
                RosterError::Configuration("gmail configuration is missing".to_string())
            })?;
            Ok(Arc::new(GmailTransport::new(gmail)?))
        }
        TransportProvider::DryRun => Ok(Arc::new(DryRunTransport::new())),
    }
}
