use thiserror::Error;

/// Contact card encoding errors
#[derive(Error, Debug)]
pub enum CardError {
    #[error("Profile has no display name")]
    MissingName,

    #[error(transparent)]
    CoreError(#[from] tapcard_core::error::CoreError),
}

pub type CardResult<T> = std::result::Result<T, CardError>;
