//! Dist upload flow: select, describe, upload with retry.
//!
//! This crate implements the **business logic** of pushing a build output
//! directory to a bucket. It performs no object-store I/O itself; the host
//! supplies a [`TransferClient`](distpush_transfer::TransferClient) and the
//! resolved [`DeployOptions`](distpush_config::DeployOptions).
//!
//! # Pipeline
//!
//! 1. **Select**: filter the dist file list and prune compressed variants
//! 2. **Describe**: assemble the immutable `TransferRequest`
//! 3. **Upload**: drive the transfer client, retrying whole attempts with
//!    randomized backoff until success or the retry budget runs out

pub mod backoff;
pub mod builder;
pub mod error;
pub mod orchestrator;
pub mod types;
pub mod upload;

// Re-export primary types for convenience.
pub use backoff::RetryPolicy;
pub use builder::build_transfer_request;
pub use error::UploadError;
pub use orchestrator::UploadOrchestrator;
pub use types::{UploadEvent, UploadResult};
pub use upload::{select_files, upload};
