//! Profile model for public business cards.
//!
//! Mirrors the backend JSON wire format (camelCase). The profile is
//! read-only in this subsystem: fetched once per page view and never
//! mutated locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const fn default_true() -> bool {
    true
}

/// The subject of a contact card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Unique slug used as the public routing key.
    pub handle: String,
    pub full_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub company_logo_url: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    /// Contact links in display order.
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub note: Option<ProfileNote>,
    #[serde(default)]
    pub alert: Option<ProfileAlert>,
    /// Cards on unprovisioned hardware render a distinct disabled state.
    #[serde(default = "default_true")]
    pub nfc_enabled: bool,
    /// Revision marker, emitted as the document REV field.
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Profile {
    /// Creates a minimal profile for the given handle and display name.
    #[must_use]
    pub fn new(handle: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id: None,
            handle: handle.into(),
            full_name: full_name.into(),
            title: None,
            company: None,
            avatar_url: None,
            company_logo_url: None,
            cover_image_url: None,
            links: Vec::new(),
            note: None,
            alert: None,
            nfc_enabled: true,
            last_updated: None,
        }
    }

    /// Returns the visible links in stored order.
    pub fn visible_links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(|l| l.is_visible)
    }
}

/// One contact channel on a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Declared type as stored ("linkedin", "phone", or arbitrary text).
    #[serde(rename = "type")]
    pub link_type: String,
    /// Raw user-entered value: digits, handle, URL, or address text.
    pub value: String,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    /// When set, overrides `link_type` for action classification. Lets an
    /// operator reassign a link's behavior without rewriting its value.
    #[serde(default)]
    pub icon: Option<String>,
}

impl Link {
    /// Creates a visible link with the given type and value.
    #[must_use]
    pub fn new(link_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: None,
            link_type: link_type.into(),
            value: value.into(),
            is_visible: true,
            icon: None,
        }
    }
}

/// Free-text annotation with its own visibility flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileNote {
    pub value: String,
    #[serde(default = "default_true")]
    pub is_visible: bool,
}

/// Transient banner shown atop a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileAlert {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub text: String,
    pub kind: AlertKind,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl ProfileAlert {
    /// Returns whether the alert may still render at the given instant.
    /// An alert past its expiry never renders, regardless of other flags.
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|expiry| expiry > now)
    }

    /// Key used for session-scoped dismissal tracking.
    #[must_use]
    pub fn dismissal_key(&self) -> String {
        self.id
            .map_or_else(|| self.text.clone(), |id| id.to_string())
    }
}

/// Alert presentation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Text,
    Link,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn profile_deserializes_from_backend_json() {
        let json = r#"{
            "handle": "ada",
            "fullName": "Ada Lovelace",
            "title": "Analyst",
            "links": [
                {"type": "email", "value": "ada@example.com", "isVisible": true},
                {"type": "custom-thing", "value": "x", "isVisible": false, "icon": "phone"}
            ],
            "note": {"value": "Hello", "isVisible": true},
            "nfcEnabled": true
        }"#;

        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.full_name, "Ada Lovelace");
        assert_eq!(profile.links.len(), 2);
        assert_eq!(profile.links[1].icon.as_deref(), Some("phone"));
        assert_eq!(profile.visible_links().count(), 1);
    }

    #[test]
    fn nfc_enabled_defaults_to_true() {
        let profile: Profile =
            serde_json::from_str(r#"{"handle": "a", "fullName": "A"}"#).unwrap();
        assert!(profile.nfc_enabled);
    }

    #[test]
    fn alert_active_without_expiry() {
        let alert = ProfileAlert {
            id: None,
            text: "Out of office".to_string(),
            kind: AlertKind::Text,
            link: None,
            icon: None,
            expires_at: None,
        };
        assert!(alert.is_active(Utc::now()));
    }

    #[test]
    fn alert_expired_never_renders() {
        let now = Utc::now();
        let alert = ProfileAlert {
            id: None,
            text: "Sale".to_string(),
            kind: AlertKind::Link,
            link: Some("https://example.com".to_string()),
            icon: None,
            expires_at: Some(now - TimeDelta::seconds(1)),
        };
        assert!(!alert.is_active(now));
    }

    #[test]
    fn alert_dismissal_key_prefers_id() {
        let id = Uuid::new_v4();
        let alert = ProfileAlert {
            id: Some(id),
            text: "Hi".to_string(),
            kind: AlertKind::Text,
            link: None,
            icon: None,
            expires_at: None,
        };
        assert_eq!(alert.dismissal_key(), id.to_string());
    }
}
