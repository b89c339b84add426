//! Gmail REST API transport
//!
//! Messages are sent with `users.messages.send`, passing the composed message as
//! base64url in the `raw` field. Access tokens are either configured directly or
//! obtained with an OAuth refresh-token grant and cached until shortly before expiry.

use super::composer::EncodedMessage;
use super::transport::{DeliveryReceipt, MessageTransport};
use crate::config::GmailConfig;
use crate::domain::{Result, RosterError, TransportError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Tokens are refreshed this long before they expire
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

struct CachedToken {
    token: SecretString,
    expires_at: Instant,
}

/// Sends mail through the Gmail API
pub struct GmailTransport {
    client: Client,
    config: GmailConfig,
    token: Mutex<Option<CachedToken>>,
}

impl GmailTransport {
    /// Creates a transport from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: GmailConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RosterError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            token: Mutex::new(None),
        })
    }

    fn send_url(&self) -> String {
        format!(
            "{}/gmail/v1/users/{}/messages/send",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.user_id
        )
    }

    async fn access_token(&self) -> std::result::Result<SecretString, TransportError> {
        if let Some(token) = &self.config.access_token {
            return Ok(token.clone());
        }

        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.token.clone());
            }
        }

        let fresh = self.refresh_access_token().await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }

    async fn refresh_access_token(&self) -> std::result::Result<CachedToken, TransportError> {
        let (Some(client_id), Some(client_secret), Some(refresh_token)) = (
            self.config.client_id.as_deref(),
            self.config.client_secret.as_ref(),
            self.config.refresh_token.as_ref(),
        ) else {
            return Err(TransportError::Authentication(
                "no access token and incomplete refresh credentials".to_string(),
            ));
        };

        tracing::debug!(token_url = %self.config.token_url, "Refreshing Gmail access token");

        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", client_id),
            ("client_secret", client_secret.expose_secret().as_str()),
            ("refresh_token", refresh_token.expose_secret().as_str()),
        ];

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| TransportError::Authentication(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Authentication(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| TransportError::Authentication(format!("invalid token response: {e}")))?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        Ok(CachedToken {
            token: SecretString::new(token.access_token),
            expires_at: Instant::now() + lifetime,
        })
    }
}

#[async_trait]
impl MessageTransport for GmailTransport {
    async fn send(
        &self,
        message: &EncodedMessage,
    ) -> std::result::Result<DeliveryReceipt, TransportError> {
        let token = self.access_token().await?;

        let response = self
            .client
            .post(self.send_url())
            .bearer_auth(token.expose_secret())
            .json(&serde_json::json!({ "raw": message.raw }))
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let sent: SendResponse = response
            .json()
            .await
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))?;

        tracing::debug!(message_id = %sent.id, size = message.size, "Gmail accepted message");
        Ok(DeliveryReceipt {
            message_id: sent.id,
        })
    }

    fn name(&self) -> &'static str {
        "gmail"
    }
}
