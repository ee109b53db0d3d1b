use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),

    #[error("invalid placeholder code: {0}")]
    InvalidCode(String),
}
