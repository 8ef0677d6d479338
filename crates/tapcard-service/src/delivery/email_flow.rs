//! The "email me this contact" flow.
//!
//! Strictly sequential: a non-empty address, then a validator verdict, then
//! encode, then send. Sequencing is enforced by awaiting each step in
//! order; there is no retry or backoff anywhere in the flow.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

use tapcard_vcf::Profile;

use super::platform::Platform;
use super::save_contact;
use crate::email::{EmailAttachment, EmailSender, EmailValidator, OutboundEmail, Verdict};
use crate::error::ServiceError;
use crate::photo::PhotoInliner;

/// How long the UI shows the Sent state before resetting to Idle.
pub const SENT_RESET_DELAY: Duration = Duration::from_secs(3);

/// Flow states, reported to clients for modal sequencing. Nothing persists
/// across a modal close/reopen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailFlowState {
    Idle,
    ValidatingEmail,
    SendingEmail,
    Sent,
}

impl EmailFlowState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ValidatingEmail => "validating_email",
            Self::SendingEmail => "sending_email",
            Self::Sent => "sent",
        }
    }
}

impl std::fmt::Display for EmailFlowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures of the email flow. Every variant maps to an inline message in
/// the modal; the modal stays open for retry.
#[derive(Error, Debug)]
pub enum EmailFlowError {
    #[error("Email address is required")]
    EmptyAddress,

    #[error("This email address appears to be undeliverable")]
    Undeliverable,

    #[error("Unable to verify this email address")]
    VerificationFailed,

    /// Send collaborator failure, message verbatim when it provided one.
    #[error("{0}")]
    SendFailed(String),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Confirmation of a sent contact card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailReceipt {
    pub to: String,
    pub attachment_filename: String,
}

/// Collaborators the flow depends on.
pub struct EmailDeps<'a> {
    pub validator: &'a EmailValidator,
    pub sender: &'a EmailSender,
    pub inliner: &'a dyn PhotoInliner,
}

/// ## Summary
/// Validates the recipient, encodes the contact card for the requesting
/// platform, and posts it to the send collaborator as a `.vcf` attachment.
///
/// A quota-exhausted validator is a soft pass: availability of the contact
/// flow takes priority over validator uptime.
///
/// ## Errors
/// - [`EmailFlowError::EmptyAddress`] before any network call
/// - [`EmailFlowError::Undeliverable`] / [`EmailFlowError::VerificationFailed`]
///   after validation, with no send attempted
/// - [`EmailFlowError::SendFailed`] with the collaborator's message verbatim
#[tracing::instrument(skip(profile, deps, address), fields(handle = %profile.handle))]
pub async fn email_contact(
    profile: &Profile,
    platform: Platform,
    address: &str,
    deps: EmailDeps<'_>,
) -> Result<EmailReceipt, EmailFlowError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(EmailFlowError::EmptyAddress);
    }

    tracing::debug!(state = %EmailFlowState::ValidatingEmail, "Validating recipient address");
    match deps.validator.verify(address).await {
        Verdict::Undeliverable => return Err(EmailFlowError::Undeliverable),
        Verdict::Unverifiable => return Err(EmailFlowError::VerificationFailed),
        Verdict::QuotaExhausted => {
            tracing::warn!("Proceeding without verification; validator quota exhausted");
        }
        Verdict::Deliverable => {}
    }

    let saved = save_contact(profile, platform, deps.inliner).await?;

    tracing::debug!(state = %EmailFlowState::SendingEmail, "Sending contact card");
    let message = OutboundEmail {
        to: address.to_string(),
        subject: format!("Contact card for {}", contact_name(profile)),
        html: html_body(profile),
        text: text_body(profile),
        attachments: vec![EmailAttachment::vcard(
            STANDARD.encode(saved.body.as_bytes()),
            saved.filename.clone(),
        )],
    };

    deps.sender.send(&message).await.map_err(|error| match error {
        ServiceError::UpstreamError(text) => EmailFlowError::SendFailed(text),
        other => {
            tracing::error!(error = %other, "Email send failed");
            EmailFlowError::SendFailed("Failed to send email".to_string())
        }
    })?;

    tracing::info!(state = %EmailFlowState::Sent, "Contact card emailed");

    Ok(EmailReceipt {
        to: address.to_string(),
        attachment_filename: saved.filename,
    })
}

fn contact_name(profile: &Profile) -> &str {
    let name = profile.full_name.trim();
    if name.is_empty() { &profile.handle } else { name }
}

fn html_body(profile: &Profile) -> String {
    let name = contact_name(profile);
    let mut byline = String::new();
    if let Some(title) = profile.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        byline.push_str(title);
    }
    if let Some(company) = profile
        .company
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        if !byline.is_empty() {
            byline.push_str(" at ");
        }
        byline.push_str(company);
    }

    if byline.is_empty() {
        format!(
            "<p>Here is the contact card for <strong>{name}</strong>.</p>\
             <p>Open the attached file to add it to your contacts.</p>"
        )
    } else {
        format!(
            "<p>Here is the contact card for <strong>{name}</strong>, {byline}.</p>\
             <p>Open the attached file to add it to your contacts.</p>"
        )
    }
}

fn text_body(profile: &Profile) -> String {
    format!(
        "Here is the contact card for {}.\nOpen the attached file to add it to your contacts.\n",
        contact_name(profile)
    )
}
