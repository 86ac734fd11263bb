use shared::error::DomainError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid loading schedule: {0}")]
    InvalidSchedule(#[source] DomainError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}
