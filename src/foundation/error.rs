/// Convenience result type used across timeplan.
pub type PlanResult<T> = Result<T, PlanError>;

/// Top-level error taxonomy used by plan APIs.
///
/// End-of-sequence and "nothing found" are not errors; those are reported as `Option::None`.
#[derive(thiserror::Error, Debug)]
pub enum PlanError {
    /// A parameter or state the plan cannot interpret.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A step number outside the plan's sequence.
    #[error("invalid index: step {index} is outside a sequence of length {len}")]
    InvalidIndex {
        /// Offending step number.
        index: usize,
        /// Sequence length at the time of the check.
        len: usize,
    },

    /// An operation that cannot be computed for the given inputs.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Invalid user-provided plan definition or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing plan definitions.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlanError {
    /// Build a [`PlanError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`PlanError::InvalidIndex`] value.
    pub fn invalid_index(index: usize, len: usize) -> Self {
        Self::InvalidIndex { index, len }
    }

    /// Build a [`PlanError::Unsupported`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Build a [`PlanError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PlanError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
