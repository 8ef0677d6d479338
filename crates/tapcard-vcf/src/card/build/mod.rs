//! Contact card document assembly.
//!
//! One table-driven encoder covers every output variant; the per-platform
//! differences live entirely in the [`Dialect`] passed in. Output is a
//! CRLF-delimited vCard 3.0 document, folded at 75 octets.

pub mod escape;
pub mod fold;

use std::collections::HashSet;

use super::classify::{Category, classify, digits_with_leading_plus};
use super::dialect::{Dialect, PhotoField, PhotoStrategy, SocialFieldStrategy};
use super::profile::Profile;
use crate::error::{CardError, CardResult};
use escape::escape_text;
use fold::fold_line;

/// ## Summary
/// Encodes a profile snapshot into a vCard document string.
///
/// Visible links are walked in stored order; each is classified and emitted
/// per the dialect's field table. Phone numbers, emails, and URLs are each
/// emitted at most once per document. The photo outcome is supplied by the
/// caller, so for a fixed profile and photo the output is byte-identical
/// across calls.
///
/// ## Errors
/// Returns [`CardError::MissingName`] when the profile's display name is
/// blank and the dialect has no defensive name fallback.
pub fn encode(profile: &Profile, dialect: &Dialect, photo: &PhotoField) -> CardResult<String> {
    let name = display_name(profile, dialect)?;

    let mut lines: Vec<String> = Vec::with_capacity(profile.links.len() + 8);
    lines.push("BEGIN:VCARD".to_string());
    lines.push("VERSION:3.0".to_string());
    lines.push(structured_name_line(name));
    lines.push(format!("FN:{}", escape_text(name)));

    if let Some(title) = trimmed(profile.title.as_deref()) {
        lines.push(format!("TITLE:{}", escape_text(title)));
    }
    if let Some(company) = trimmed(profile.company.as_deref()) {
        lines.push(format!("ORG:{}", escape_text(company)));
    }

    let mut seen = DedupTracker::default();
    for link in profile.visible_links() {
        let classified = classify(link);
        let Some(href) = classified.href else {
            continue;
        };
        emit_link(
            &mut lines,
            &mut seen,
            dialect,
            classified.category,
            &href,
            link.value.trim(),
        );
    }

    if let Some(note) = &profile.note
        && note.is_visible
        && let Some(value) = trimmed(Some(note.value.as_str()))
    {
        lines.push(format!("NOTE:{}", escape_text(value)));
    }

    if let Some(line) = photo_line(profile, dialect, photo) {
        lines.push(line);
    }
    if let Some(logo) = trimmed(profile.company_logo_url.as_deref()) {
        lines.push(format!("LOGO;VALUE=uri:{logo}"));
    }
    if let Some(rev) = profile.last_updated {
        lines.push(format!("REV:{}", rev.format("%Y%m%dT%H%M%SZ")));
    }

    lines.push("END:VCARD".to_string());

    tracing::debug!(handle = %profile.handle, lines = lines.len(), "Encoded contact card");

    let mut doc = String::new();
    for line in &lines {
        doc.push_str(&fold_line(line));
        doc.push_str("\r\n");
    }
    Ok(doc)
}

fn display_name<'a>(profile: &'a Profile, dialect: &Dialect) -> CardResult<&'a str> {
    let name = profile.full_name.trim();
    if !name.is_empty() {
        return Ok(name);
    }
    if dialect.defensive_name {
        let handle = profile.handle.trim();
        Ok(if handle.is_empty() { "Contact" } else { handle })
    } else {
        Err(CardError::MissingName)
    }
}

/// Splits the display name at its final whitespace: last word as family
/// name, the rest as given names.
fn structured_name_line(name: &str) -> String {
    match name.rsplit_once(char::is_whitespace) {
        Some((given, family)) => format!(
            "N:{};{};;;",
            escape_text(family.trim()),
            escape_text(given.trim())
        ),
        None => format!("N:{name};;;;", name = escape_text(name)),
    }
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Per-document dedup scope. Reset for every encoding call.
#[derive(Debug, Default)]
struct DedupTracker {
    phones: HashSet<String>,
    emails: HashSet<String>,
    urls: HashSet<String>,
}

impl DedupTracker {
    /// Returns true the first time this phone number (normalized to digits
    /// plus any leading "+") is seen.
    fn phone_once(&mut self, raw: &str) -> bool {
        self.phones.insert(digits_with_leading_plus(raw))
    }

    fn email_once(&mut self, raw: &str) -> bool {
        self.emails.insert(raw.to_lowercase())
    }

    fn url_once(&mut self, href: &str) -> bool {
        self.urls.insert(href.to_string())
    }
}

fn emit_link(
    lines: &mut Vec<String>,
    seen: &mut DedupTracker,
    dialect: &Dialect,
    category: Category,
    href: &str,
    raw_value: &str,
) {
    match category {
        Category::Email => {
            if seen.email_once(raw_value) {
                lines.push(format!("EMAIL;TYPE=INTERNET:{raw_value}"));
            }
        }
        Category::Phone => {
            if seen.phone_once(raw_value) {
                lines.push(format!("TEL;TYPE=CELL:{raw_value}"));
            }
        }
        // Messaging links carry the number twice: as a dialable phone
        // field and as the protocol-specific target.
        category if category.carries_phone() => {
            if seen.phone_once(raw_value) {
                lines.push(format!("TEL;TYPE=CELL:{raw_value}"));
            }
            if seen.url_once(href) {
                lines.push(social_line(dialect, category, href));
            }
        }
        category if category.is_social() => {
            if seen.url_once(href) {
                lines.push(social_line(dialect, category, href));
            }
        }
        Category::Website => {
            if seen.url_once(href) {
                lines.push(format!("URL;TYPE=WORK:{href}"));
            }
        }
        Category::Meeting => {
            if seen.url_once(href) {
                lines.push(format!("URL;TYPE=Calendar:{href}"));
            }
        }
        Category::Address => {
            // Raw value lands in the street slot; other components empty.
            lines.push(format!("ADR;TYPE=WORK:;;{};;;;", escape_text(raw_value)));
        }
        _ => {
            if seen.url_once(href) {
                lines.push(format!("URL:{href}"));
            }
        }
    }
}

fn social_line(dialect: &Dialect, category: Category, href: &str) -> String {
    match dialect.social {
        SocialFieldStrategy::StructuredProfile => {
            format!("X-SOCIALPROFILE;type={}:{href}", category.service_token())
        }
        SocialFieldStrategy::TypedUrl => {
            format!("URL;TYPE={}:{href}", category.label())
        }
    }
}

fn photo_line(profile: &Profile, dialect: &Dialect, photo: &PhotoField) -> Option<String> {
    match dialect.photo {
        PhotoStrategy::TryInline => match photo {
            PhotoField::Inline(payload) => Some(format!("PHOTO;ENCODING=b;TYPE=JPEG:{payload}")),
            PhotoField::Reference(url) => Some(format!("PHOTO;VALUE=uri:{url}")),
            PhotoField::Omitted => None,
        },
        // The degraded dialect ignores the resolved outcome entirely.
        PhotoStrategy::ReferenceOnly => trimmed(profile.avatar_url.as_deref())
            .map(|url| format!("PHOTO;VALUE=uri:{url}")),
    }
}
