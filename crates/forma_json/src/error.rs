use thiserror::Error;

use forma_core::DeserializeError;

// -----------------------------------------------------------------------------
// Error

/// Everything that can go wrong between JSON text and a typed value.
///
/// Parse failures carry the 1-based line and column of the offending input;
/// decode failures pass through unchanged so field paths in their messages
/// survive verbatim.
#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error(transparent)]
    Deserialize(#[from] DeserializeError),
}

impl Error {
    pub(crate) fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            column,
            message: message.into(),
        }
    }
}
