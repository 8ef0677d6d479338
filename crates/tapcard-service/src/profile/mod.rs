//! Profile fetch client and alert scrubbing.

use std::collections::HashSet;

use reqwest::StatusCode;
use serde::Deserialize;

use tapcard_core::clock::Clock;
use tapcard_vcf::Profile;

use crate::error::{ServiceError, ServiceResult};

/// Outcome of looking up a profile by handle.
///
/// Not-found and NFC-disabled are distinct states: the latter must render
/// its own empty state on the card page, never "not found".
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileLookup {
    Found(Box<Profile>),
    NotFound,
    NfcDisabled,
}

#[derive(Debug, Deserialize)]
struct DataEnvelope {
    data: Profile,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<String>,
}

/// Client for the backend profile API.
#[derive(Debug, Clone)]
pub struct ProfileClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProfileClient {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// ## Summary
    /// Fetches the profile for a handle (lowercased before lookup).
    ///
    /// ## Errors
    /// Returns [`ServiceError::UpstreamError`] for non-404 failure
    /// responses; transport failures surface as [`ServiceError::HttpError`].
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, handle: &str) -> ServiceResult<ProfileLookup> {
        let handle = handle.trim().to_lowercase();
        let url = format!(
            "{}/v1/vcard/handle/{handle}",
            self.base_url.trim_end_matches('/')
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            tracing::debug!("Profile not found");
            return Ok(ProfileLookup::NotFound);
        }
        if !status.is_success() {
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("Profile fetch failed with status {status}"));
            return Err(ServiceError::UpstreamError(message));
        }

        let envelope: DataEnvelope = response.json().await?;
        if envelope.data.nfc_enabled {
            Ok(ProfileLookup::Found(Box::new(envelope.data)))
        } else {
            tracing::debug!("Profile exists but NFC is not enabled");
            Ok(ProfileLookup::NfcDisabled)
        }
    }
}

/// Removes the profile's alert when it has expired or was dismissed in the
/// current page session. Dismissals are session-scoped, never persisted.
pub fn scrub_alert(profile: &mut Profile, clock: &dyn Clock, dismissed: &HashSet<String>) {
    if let Some(alert) = &profile.alert
        && (!alert.is_active(clock.now()) || dismissed.contains(&alert.dismissal_key()))
    {
        profile.alert = None;
    }
}
