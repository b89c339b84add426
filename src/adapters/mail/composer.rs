//! MIME message composition
//!
//! Builds the outbound message with lettre and encodes it base64url, the form the
//! Gmail `messages.send` endpoint expects in its `raw` field.

use crate::domain::{AttachmentRef, Recipient, Result, RosterError};
use base64::{engine::general_purpose, Engine as _};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::Message;
use std::path::Path;

/// A message ready to be composed
#[derive(Debug, Clone, Copy)]
pub struct OutgoingMessage<'a> {
    /// Primary recipients
    pub to: &'a Recipient,
    /// Carbon copy recipients
    pub cc: Option<&'a Recipient>,
    /// Subject line
    pub subject: &'a str,
    /// Rendered HTML body
    pub html_body: &'a str,
    /// File to attach
    pub attachment: Option<&'a AttachmentRef>,
}

/// A composed message in transport-ready form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMessage {
    /// base64url encoding of the RFC 5322 message
    pub raw: String,
    /// Size of the unencoded message in bytes
    pub size: usize,
}

impl EncodedMessage {
    /// Decodes the raw message back to bytes
    pub fn decode(&self) -> Result<Vec<u8>> {
        general_purpose::URL_SAFE
            .decode(&self.raw)
            .map_err(|e| RosterError::Compose(format!("invalid base64url payload: {e}")))
    }
}

/// Builds encoded messages from a fixed sender
#[derive(Debug, Clone)]
pub struct MessageComposer {
    sender: Mailbox,
}

impl MessageComposer {
    /// Creates a composer sending as `sender`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `sender` is not a valid address.
    pub fn new(sender: &str) -> Result<Self> {
        let sender = sender.trim().parse::<Mailbox>().map_err(|e| {
            RosterError::Configuration(format!("Invalid sender address '{sender}': {e}"))
        })?;
        Ok(Self { sender })
    }

    /// Composes and encodes a message
    ///
    /// The attachment file is read here; a missing or unreadable file is a compose
    /// error.
    pub fn compose(&self, message: &OutgoingMessage<'_>) -> Result<EncodedMessage> {
        let mut builder = Message::builder()
            .from(self.sender.clone())
            .subject(message.subject);

        for mailbox in parse_mailboxes(message.to)? {
            builder = builder.to(mailbox);
        }
        if let Some(cc) = message.cc {
            for mailbox in parse_mailboxes(cc)? {
                builder = builder.cc(mailbox);
            }
        }

        let body = SinglePart::html(message.html_body.to_string());
        let built = match message.attachment {
            Some(attachment) => {
                let path = attachment.path();
                let content = std::fs::read(&path).map_err(|e| {
                    RosterError::Compose(format!(
                        "failed to read attachment {}: {e}",
                        path.display()
                    ))
                })?;
                let part = Attachment::new(attachment.filename.clone())
                    .body(content, guess_content_type(&path));
                builder.multipart(MultiPart::mixed().singlepart(body).singlepart(part))
            }
            None => builder.singlepart(body),
        }
        .map_err(|e| RosterError::Compose(e.to_string()))?;

        let formatted = built.formatted();
        Ok(EncodedMessage {
            raw: general_purpose::URL_SAFE.encode(&formatted),
            size: formatted.len(),
        })
    }
}

fn parse_mailboxes(recipient: &Recipient) -> Result<Vec<Mailbox>> {
    recipient
        .addresses()
        .map(|address| {
            address.parse::<Mailbox>().map_err(|e| {
                RosterError::Compose(format!("invalid recipient address '{address}': {e}"))
            })
        })
        .collect()
}

/// Content type from the file extension; unknown types are sent as octet-stream
fn guess_content_type(path: &Path) -> ContentType {
    let mime = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("csv") => "text/csv",
        Some("txt") => "text/plain",
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    };
    ContentType::parse(mime).unwrap_or(ContentType::TEXT_PLAIN)
}
