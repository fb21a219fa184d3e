//! Selection error types.

/// Errors produced while preparing the upload set.
///
/// Filtering itself never fails; only pattern compilation and the
/// directory scan can.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("invalid glob pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
