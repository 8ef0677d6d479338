//! Link classification.
//!
//! Maps a raw link's declared type (or icon override) to a canonical action
//! category and a fully-qualified target. The same table drives both the
//! click handlers on the profile page and the field emission in the
//! encoder, so the rules live in exactly one place.

use super::profile::Link;

/// Canonical action category a link resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Email,
    Phone,
    WhatsApp,
    Sms,
    Website,
    LinkedIn,
    Instagram,
    Twitter,
    Facebook,
    YouTube,
    GitHub,
    Meeting,
    Address,
    Message,
    Other,
}

impl Category {
    /// Resolves a lowercased type/icon token. Unknown tokens are `Other`.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "email" => Self::Email,
            "phone" => Self::Phone,
            "whatsapp" => Self::WhatsApp,
            "sms" => Self::Sms,
            "website" => Self::Website,
            "linkedin" => Self::LinkedIn,
            "instagram" => Self::Instagram,
            "twitter" => Self::Twitter,
            "facebook" => Self::Facebook,
            "youtube" => Self::YouTube,
            "github" => Self::GitHub,
            "address" => Self::Address,
            "message" => Self::Message,
            // Both spellings occur in stored data.
            "book-meeting" | "book meeting" => Self::Meeting,
            _ => Self::Other,
        }
    }

    /// Returns whether this category carries a phone number alongside its
    /// protocol-specific target.
    #[must_use]
    pub const fn carries_phone(self) -> bool {
        matches!(self, Self::WhatsApp | Self::Sms)
    }

    /// Returns whether this category is rendered through the dialect's
    /// social/messaging field strategy.
    #[must_use]
    pub const fn is_social(self) -> bool {
        matches!(
            self,
            Self::WhatsApp
                | Self::Sms
                | Self::LinkedIn
                | Self::Instagram
                | Self::Twitter
                | Self::Facebook
                | Self::YouTube
                | Self::GitHub
                | Self::Message
        )
    }

    /// Display label used for typed URL fields (`URL;TYPE=<label>`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::WhatsApp => "WhatsApp",
            Self::Sms => "SMS",
            Self::Website => "Website",
            Self::LinkedIn => "LinkedIn",
            Self::Instagram => "Instagram",
            Self::Twitter => "Twitter",
            Self::Facebook => "Facebook",
            Self::YouTube => "YouTube",
            Self::GitHub => "GitHub",
            Self::Meeting => "Calendar",
            Self::Address => "Address",
            Self::Message => "Message",
            Self::Other => "Link",
        }
    }

    /// Lowercase service token used for structured social profile fields
    /// (`X-SOCIALPROFILE;type=<token>`).
    #[must_use]
    pub const fn service_token(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::WhatsApp => "whatsapp",
            Self::Sms => "sms",
            Self::Website => "website",
            Self::LinkedIn => "linkedin",
            Self::Instagram => "instagram",
            Self::Twitter => "twitter",
            Self::Facebook => "facebook",
            Self::YouTube => "youtube",
            Self::GitHub => "github",
            Self::Meeting => "calendar",
            Self::Address => "address",
            Self::Message => "message",
            Self::Other => "link",
        }
    }
}

/// The outcome of classifying a single link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub category: Category,
    /// Fully-qualified target. `None` when the link value is blank; such a
    /// link is skipped by every encoder and click handler.
    pub href: Option<String>,
}

/// Classifies a link into an action category and target.
///
/// The icon override wins over the stored type when present and non-empty.
#[must_use]
pub fn classify(link: &Link) -> Classified {
    let token = link
        .icon
        .as_deref()
        .map(str::trim)
        .filter(|icon| !icon.is_empty())
        .unwrap_or(&link.link_type)
        .trim()
        .to_lowercase();

    let category = Category::from_token(&token);

    let value = link.value.trim();
    let href = if value.is_empty() {
        None
    } else {
        Some(resolve_href(category, value))
    };

    Classified { category, href }
}

fn resolve_href(category: Category, value: &str) -> String {
    match category {
        Category::Email => format!("mailto:{value}"),
        // Phone values pass through unmodified.
        Category::Phone => format!("tel:{value}"),
        Category::WhatsApp => format!("https://wa.me/{}", digits_only(value)),
        Category::Sms => format!("sms:{}", digits_with_leading_plus(value)),
        Category::LinkedIn => network_href(value, "https://www.linkedin.com/in/"),
        Category::Instagram => network_href(value, "https://www.instagram.com/"),
        Category::GitHub => network_href(value, "https://github.com/"),
        Category::Facebook => network_href(value, "https://www.facebook.com/"),
        Category::Twitter => network_href(value, "https://twitter.com/"),
        Category::YouTube => network_href(value, "https://www.youtube.com/@"),
        Category::Website | Category::Meeting | Category::Message | Category::Other => {
            ensure_scheme(value)
        }
        // Address values are postal text, never a URL.
        Category::Address => value.to_string(),
    }
}

/// Prefixes `https://` unless the value is already an absolute http(s) URL.
fn ensure_scheme(value: &str) -> String {
    if value.starts_with("http") {
        value.to_string()
    } else {
        format!("https://{value}")
    }
}

/// Values that are already full URLs pass through; bare handles get the
/// network's base URL.
fn network_href(value: &str, base: &str) -> String {
    if value.starts_with("http") {
        value.to_string()
    } else {
        format!("{base}{value}")
    }
}

/// Strips every non-digit character.
#[must_use]
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Strips everything except digits and a leading "+".
#[must_use]
pub fn digits_with_leading_plus(value: &str) -> String {
    let trimmed = value.trim();
    let digits = digits_only(trimmed);
    if trimmed.starts_with('+') {
        format!("+{digits}")
    } else {
        digits
    }
}
