use thiserror::Error;

use clinanon_core::error::CoreError;

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("primary mention is not mapped: {0}")]
    PrimaryNotFound(String),

    #[error("no person base ID for code: {0}")]
    NoBaseId(String),

    #[error("no mapping uses code: {0}")]
    CodeNotFound(String),

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
