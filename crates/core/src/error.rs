use thiserror::Error;

#[derive(Error, Debug)]
pub enum RubyscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Offset {offset} is out of bounds or not on a character boundary (buffer length {len})")]
    InvalidOffset { offset: usize, len: usize },
    #[error("Parsing error: {0}")]
    Parsing(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<RubyscopeError> for rubyscope_api::ApiError {
    fn from(err: RubyscopeError) -> Self {
        match err {
            RubyscopeError::InvalidOffset { offset, len } => {
                rubyscope_api::ApiError::InvalidOffset { offset, len }
            }
            other => rubyscope_api::ApiError::Internal(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, RubyscopeError>;
