//! Transactional email send client.

use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

/// A named attachment, base64-encoded.
#[derive(Debug, Clone, Serialize)]
pub struct EmailAttachment {
    /// Base64 payload.
    pub content: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub disposition: String,
}

impl EmailAttachment {
    /// Creates a contact card attachment.
    #[must_use]
    pub fn vcard(content: String, filename: String) -> Self {
        Self {
            content,
            filename,
            content_type: tapcard_core::constants::VCARD_MIME.to_string(),
            disposition: "attachment".to_string(),
        }
    }
}

/// An outbound message for the send collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
    pub attachments: Vec<EmailAttachment>,
}

#[derive(Debug, Deserialize)]
struct SendErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Client for the email send collaborator.
#[derive(Debug, Clone)]
pub struct EmailSender {
    client: reqwest::Client,
    send_url: String,
}

impl EmailSender {
    #[must_use]
    pub fn new(client: reqwest::Client, send_url: impl Into<String>) -> Self {
        Self {
            client,
            send_url: send_url.into(),
        }
    }

    /// ## Summary
    /// Posts the message to the send collaborator.
    ///
    /// ## Errors
    /// Returns [`ServiceError::UpstreamError`] carrying the collaborator's
    /// error message verbatim when present, a generic message otherwise;
    /// transport failures surface as [`ServiceError::HttpError`].
    #[tracing::instrument(skip(self, message), fields(to = %message.to))]
    pub async fn send(&self, message: &OutboundEmail) -> ServiceResult<()> {
        let response = self.client.post(&self.send_url).json(message).send().await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!("Contact card emailed");
            return Ok(());
        }

        let upstream_message = response
            .json::<SendErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);
        tracing::warn!(%status, message = ?upstream_message, "Send collaborator rejected the message");

        Err(ServiceError::UpstreamError(
            upstream_message.unwrap_or_else(|| "Failed to send email".to_string()),
        ))
    }
}
