/// Convenience result type used across letterfx.
pub type LetterfxResult<T> = Result<T, LetterfxError>;

/// Top-level error taxonomy used by rule, engine and codegen APIs.
#[derive(thiserror::Error, Debug)]
pub enum LetterfxError {
    /// Invalid user-provided rule data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while building the emitted snippet.
    #[error("generation error: {0}")]
    Generation(String),

    /// Errors raised by the in-memory engine when a caller breaks its contract.
    #[error("runtime error: {0}")]
    Runtime(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LetterfxError {
    /// Build a [`LetterfxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LetterfxError::Generation`] value.
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    /// Build a [`LetterfxError::Runtime`] value.
    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    /// Build a [`LetterfxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for LetterfxError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
