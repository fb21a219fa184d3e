//! Transfer error types.

/// Errors reported by a transfer client while an attempt is running.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("I/O error for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("network error: {message}")]
    Network { message: String, retryable: bool },

    #[error("access denied to bucket {bucket}: {message}")]
    AccessDenied { bucket: String, message: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Other(String),
}

impl TransferError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether retrying the same request could plausibly succeed.
    ///
    /// Only consulted when the orchestrator runs in fail-fast mode.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransferError::Network { retryable, .. } => *retryable,
            TransferError::Io { .. } => false,
            TransferError::AccessDenied { .. } => false,
            TransferError::InvalidRequest(_) => false,
            TransferError::Other(_) => false,
        }
    }
}
