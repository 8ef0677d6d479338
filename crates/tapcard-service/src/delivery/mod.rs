//! Delivery dispatcher: turns a profile into a downloadable or emailed
//! contact card.
//!
//! Composition order mirrors the page: resolve the photo (the only
//! network-dependent step), then run the pure encoder, then deliver. A
//! primary encoder failure silently degrades to the fallback dialect; the
//! user only ever sees a successful save.

pub mod email_flow;
pub mod platform;

pub use email_flow::{
    EmailDeps, EmailFlowError, EmailFlowState, EmailReceipt, SENT_RESET_DELAY, email_contact,
};
pub use platform::Platform;

use sha2::{Digest, Sha256};

use tapcard_core::constants::VCARD_MIME;
use tapcard_core::util::filename::vcf_filename;
use tapcard_vcf::{Dialect, PhotoField, PhotoStrategy, Profile, encode};

use crate::error::ServiceResult;
use crate::photo::PhotoInliner;

/// A generated contact card ready for download.
#[derive(Debug, Clone)]
pub struct SavedContact {
    /// Download filename, display name with whitespace runs collapsed to
    /// underscores.
    pub filename: String,
    pub mime: &'static str,
    pub body: String,
    /// Hex SHA-256 of the body.
    pub etag: String,
}

/// ## Summary
/// Generates the contact card document for a save action.
///
/// Resolves the photo through the inliner, encodes with the platform's
/// dialect, and degrades to the fallback dialect if the primary encoder
/// fails. Encoding errors never surface to the caller.
///
/// ## Errors
/// Only the fallback encoder's errors propagate, and it is built not to
/// fail on real profiles.
#[tracing::instrument(skip(profile, inliner), fields(handle = %profile.handle))]
pub async fn save_contact(
    profile: &Profile,
    platform: Platform,
    inliner: &dyn PhotoInliner,
) -> ServiceResult<SavedContact> {
    let dialect = platform.dialect();
    let photo = resolve_photo(profile, &dialect, inliner).await;
    let body = encode_with_fallback(profile, &dialect, &photo)?;

    let etag = hex::encode(Sha256::digest(body.as_bytes()));
    let filename = vcf_filename(&profile.full_name);

    tracing::debug!(%filename, bytes = body.len(), "Contact card generated");

    Ok(SavedContact {
        filename,
        mime: VCARD_MIME,
        body,
        etag,
    })
}

/// Resolves the photo outcome ahead of encoding so the encoder itself
/// stays pure.
async fn resolve_photo(
    profile: &Profile,
    dialect: &Dialect,
    inliner: &dyn PhotoInliner,
) -> PhotoField {
    if dialect.photo == PhotoStrategy::ReferenceOnly {
        return PhotoField::Omitted;
    }
    let Some(url) = profile
        .avatar_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
    else {
        return PhotoField::Omitted;
    };

    match inliner.inline(url).await {
        Some(payload) => PhotoField::Inline(payload),
        None => PhotoField::Reference(url.to_string()),
    }
}

fn encode_with_fallback(
    profile: &Profile,
    dialect: &Dialect,
    photo: &PhotoField,
) -> ServiceResult<String> {
    match encode(profile, dialect, photo) {
        Ok(body) => Ok(body),
        Err(error) => {
            tracing::warn!(error = %error, "Primary encoder failed; degrading to fallback dialect");
            Ok(encode(profile, &Dialect::fallback(), photo)?)
        }
    }
}
