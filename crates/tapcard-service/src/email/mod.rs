//! Email collaborators: deliverability validation and transactional send.

pub mod send;
pub mod validate;

pub use send::{EmailAttachment, EmailSender, OutboundEmail};
pub use validate::{EmailValidator, Verdict};
