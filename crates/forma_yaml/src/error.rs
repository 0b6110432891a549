use thiserror::Error;

use forma_core::DeserializeError;

// -----------------------------------------------------------------------------
// Error

/// Everything that can go wrong between YAML text and a typed value.
#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Deserialize(#[from] DeserializeError),
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
