use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] tapcard_service::error::ServiceError),

    #[error(transparent)]
    CardError(#[from] tapcard_vcf::error::CardError),

    #[error(transparent)]
    CoreError(#[from] tapcard_core::error::CoreError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
