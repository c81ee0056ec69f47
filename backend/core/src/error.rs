use thiserror::Error;

/// Failure classification for a username submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    #[error("that name is already taken")]
    NameTaken,

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("internal assertion failed: {0}")]
    Assertion(String),

    #[error("{0}")]
    Other(String),
}

impl NamingError {
    /// Whether the user can fix the name and resubmit from the same screen.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, NamingError::NameTaken | NamingError::InvalidName(_))
    }
}
