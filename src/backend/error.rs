//! Error types for backend operations.

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Error type for catalog backend operations.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Network-level failure: connection refused, DNS, timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-2xx status.
    #[error("service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded into the expected DTO.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The request could not be built or is invalid for this backend.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl BackendError {
    /// Whether a retry of the same request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            BackendError::Transport(_) => true,
            BackendError::Status { status, .. } => *status >= 500,
            BackendError::Decode(_) | BackendError::InvalidRequest(_) => false,
        }
    }
}

#[cfg(feature = "http-backend")]
impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else if err.is_builder() {
            BackendError::InvalidRequest(err.to_string())
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}
