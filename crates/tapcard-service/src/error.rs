use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    CardError(#[from] tapcard_vcf::error::CardError),

    #[error(transparent)]
    CoreError(#[from] tapcard_core::error::CoreError),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failure reported by an external collaborator, message verbatim.
    #[error("{0}")]
    UpstreamError(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
