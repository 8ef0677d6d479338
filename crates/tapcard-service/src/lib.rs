//! Network collaborators and delivery orchestration for tapcard.
//!
//! Everything that talks to the outside world lives here: the profile
//! fetch client, the photo inliner, the email validation and send clients,
//! and the delivery dispatcher composing them into the save/email flows.

pub mod delivery;
pub mod email;
pub mod error;
pub mod photo;
pub mod profile;
