//! Contact card model and encoding.
//!
//! ## Overview
//!
//! A [`profile::Profile`] is the immutable snapshot of a public business
//! card: identity, media URLs, and an ordered list of contact links. The
//! encoder walks the visible links, classifies each one into an action
//! category ([`classify`]), and emits vCard field lines according to a
//! [`dialect::Dialect`] table. The dialect captures the only two ways the
//! output variants differ: how social/messaging links are spelled, and
//! whether the photo may be inlined.
//!
//! ## Usage
//!
//! ```rust
//! use tapcard_vcf::{Dialect, Link, PhotoField, Profile, encode};
//!
//! let mut profile = Profile::new("ada", "Ada Lovelace");
//! profile.links.push(Link::new("email", "ada@example.com"));
//!
//! let doc = encode(&profile, &Dialect::android(), &PhotoField::Omitted).unwrap();
//! assert!(doc.starts_with("BEGIN:VCARD\r\n"));
//! assert!(doc.contains("EMAIL;TYPE=INTERNET:ada@example.com"));
//! ```
//!
//! ## Determinism
//!
//! For a fixed profile and a fixed [`dialect::PhotoField`] outcome the
//! output is byte-for-byte identical across calls. The only timestamp in
//! the document is the profile's own revision marker.

pub mod build;
pub mod classify;
pub mod dialect;
pub mod profile;

pub use build::encode;
