#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid offset {offset} for a buffer of {len} bytes")]
    InvalidOffset { offset: usize, len: usize },
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
