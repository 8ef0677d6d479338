//! Encoder dialects.
//!
//! The output variants differ in exactly two places: how social/messaging
//! links are spelled, and how the photo is embedded. Capturing both in a
//! small table keeps the encoder itself single-sourced.

/// How social and messaging links are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialFieldStrategy {
    /// `X-SOCIALPROFILE;type=<service>:<href>`, parsed reliably by the
    /// Apple contacts app, which is inconsistent about generic typed URL
    /// fields for the same networks.
    StructuredProfile,
    /// `URL;TYPE=<Label>:<href>`, the portable spelling preferred by
    /// Android and everything else.
    TypedUrl,
}

/// How the avatar photo is embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoStrategy {
    /// Inline base64 bytes when available, URL reference otherwise.
    TryInline,
    /// Always reference the avatar by URL; never inline.
    ReferenceOnly,
}

/// The resolved photo outcome handed to the encoder.
///
/// Photo fetching is the one network-dependent step in card generation, so
/// it happens before encoding and its outcome is passed in as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoField {
    /// Base64 payload with no data-URI prefix.
    Inline(String),
    /// Avatar URL to reference instead of embedding.
    Reference(String),
    /// No usable avatar.
    Omitted,
}

/// A field-emission dialect for one client platform family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialect {
    pub social: SocialFieldStrategy,
    pub photo: PhotoStrategy,
    /// Substitute the handle for a blank display name instead of failing.
    pub defensive_name: bool,
}

impl Dialect {
    /// Dialect tuned for the Apple contacts app.
    #[must_use]
    pub const fn apple() -> Self {
        Self {
            social: SocialFieldStrategy::StructuredProfile,
            photo: PhotoStrategy::TryInline,
            defensive_name: false,
        }
    }

    /// Dialect tuned for Android and other clients.
    #[must_use]
    pub const fn android() -> Self {
        Self {
            social: SocialFieldStrategy::TypedUrl,
            photo: PhotoStrategy::TryInline,
            defensive_name: false,
        }
    }

    /// Degraded dialect used when the primary encoder fails: Android field
    /// spelling, URL-reference photo only, and a defensive name fallback.
    #[must_use]
    pub const fn fallback() -> Self {
        Self {
            social: SocialFieldStrategy::TypedUrl,
            photo: PhotoStrategy::ReferenceOnly,
            defensive_name: true,
        }
    }
}
