use thiserror::Error;

use crate::core::ValidationError;

#[derive(Error, Debug)]
pub enum FireError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type FireResult<T> = Result<T, FireError>;
