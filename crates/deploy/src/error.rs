//! Upload error types.

use distpush_config::ConfigError;
use distpush_selection::SelectionError;
use distpush_transfer::TransferError;

/// Errors surfaced by the upload flow.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Every allowed attempt failed.
    #[error("upload failed after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: TransferError,
    },

    /// Fail-fast mode hit an error that is not worth retrying.
    #[error("upload failed after {attempts} attempts with a non-retryable error: {source}")]
    Fatal {
        attempts: u32,
        #[source]
        source: TransferError,
    },

    #[error("selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl UploadError {
    /// Number of transfer attempts made, when the failure came from the
    /// transfer itself.
    pub fn attempts(&self) -> Option<u32> {
        match self {
            UploadError::Exhausted { attempts, .. } | UploadError::Fatal { attempts, .. } => {
                Some(*attempts)
            }
            UploadError::Selection(_) | UploadError::Config(_) => None,
        }
    }
}
