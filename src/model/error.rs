use thiserror::Error;

/// Errors raised by the entity model and the scoring engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A constructor or mutator was handed a value it cannot accept.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The entity graph contradicts itself (e.g. a performance filed under the
    /// wrong race).
    #[error("consistency violation: {0}")]
    ConsistencyViolation(String),

    /// A textual value could not be parsed.
    #[error("cannot parse {what} from '{input}'")]
    Parse { what: &'static str, input: String },
}

impl ModelError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ModelError::InvalidArgument(msg.into())
    }

    pub(crate) fn inconsistent(msg: impl Into<String>) -> Self {
        ModelError::ConsistencyViolation(msg.into())
    }

    pub(crate) fn parse(what: &'static str, input: &str) -> Self {
        ModelError::Parse {
            what,
            input: input.to_string(),
        }
    }
}

/// Fail with `InvalidArgument` when a required string field is blank.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        Err(ModelError::invalid(format!("{} must not be empty", field)))
    } else {
        Ok(())
    }
}
