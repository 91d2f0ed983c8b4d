/// Convenience result type used across typereveal.
pub type RevealResult<T> = Result<T, RevealError>;

/// Top-level error taxonomy used by scene and configuration APIs.
///
/// The reveal engine and visibility trigger are total and never produce these.
#[derive(thiserror::Error, Debug)]
pub enum RevealError {
    /// Invalid user-provided scene or option data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration could not be located or opened.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RevealError {
    /// Build a [`RevealError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RevealError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`RevealError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
