use thiserror::Error;

use clinanon_core::error::CoreError;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("malformed detector output: {0}")]
    MalformedInput(String),

    #[error("entity {index}: missing required field '{field}'")]
    MissingRequiredField { index: usize, field: &'static str },

    #[error(transparent)]
    Core(#[from] CoreError),
}
