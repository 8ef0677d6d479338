//! Avatar photo inlining.
//!
//! The one network-dependent step in card generation. Fetch failures are
//! never fatal: callers treat `None` as "reference the avatar by URL".

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Converts an avatar resource into an embeddable base64 payload.
#[async_trait]
pub trait PhotoInliner: Send + Sync {
    /// Returns the base64 payload (no data-URI prefix), or `None` when the
    /// resource could not be fetched or decoded.
    async fn inline(&self, url: &str) -> Option<String>;
}

/// Inliner backed by an HTTP client.
#[derive(Debug, Clone)]
pub struct HttpPhotoInliner {
    client: reqwest::Client,
}

impl HttpPhotoInliner {
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch(&self, url: &str) -> Result<String, reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        Ok(STANDARD.encode(&bytes))
    }
}

#[async_trait]
impl PhotoInliner for HttpPhotoInliner {
    async fn inline(&self, url: &str) -> Option<String> {
        match self.fetch(url).await {
            Ok(payload) => Some(payload),
            Err(error) => {
                tracing::debug!(%url, error = %error, "Avatar fetch failed; falling back to URL reference");
                None
            }
        }
    }
}

/// Inliner with a fixed outcome, for tests exercising encoder determinism.
#[derive(Debug, Clone, Default)]
pub struct FixedPhotoInliner(pub Option<String>);

#[async_trait]
impl PhotoInliner for FixedPhotoInliner {
    async fn inline(&self, _url: &str) -> Option<String> {
        self.0.clone()
    }
}
