use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("unknown view id '{0}'")]
    UnknownView(String),
    #[error("invalid loading step {index}: {reason}")]
    InvalidStep { index: usize, reason: String },
}

impl DomainError {
    pub fn invalid_step(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidStep {
            index,
            reason: reason.into(),
        }
    }
}
