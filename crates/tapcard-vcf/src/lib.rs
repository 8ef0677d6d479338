//! Contact card encoding for tapcard digital business cards.
//!
//! Turns a profile record into a vCard 3.0 document tuned for the contact
//! apps of different client platforms. Everything in this crate is pure and
//! deterministic; photo bytes arrive pre-resolved from the caller.

pub mod card;
pub mod error;

pub use card::classify::{Category, Classified, classify};
pub use card::dialect::{Dialect, PhotoField, PhotoStrategy, SocialFieldStrategy};
pub use card::encode;
pub use card::profile::{AlertKind, Link, Profile, ProfileAlert, ProfileNote};
pub use error::{CardError, CardResult};
