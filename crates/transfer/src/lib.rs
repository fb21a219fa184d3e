//! Transfer request model and the transfer-client boundary.
//!
//! The deploy core describes *what* to upload with a [`TransferRequest`] and
//! hands it to a [`TransferClient`], which performs the actual object-store
//! I/O and reports progress as a lazy stream of [`BatchCompletion`]s.
//!
//! [`LocalBucketClient`] is a filesystem-backed client used for dry runs and
//! tests; real object-store clients live with the host.

mod client;
mod content_type;
mod error;
mod local;
mod types;
mod validation;

pub use client::{BatchStream, TransferClient};
pub use content_type::{content_encoding, detect_content_type};
pub use error::TransferError;
pub use local::{LocalBucketClient, ObjectMetadata};
pub use types::{BatchCompletion, CannedAcl, ServerSideEncryption, TransferRequest, object_key};
pub use validation::validate_object_path;

/// Batch size used by [`LocalBucketClient`] when the request leaves it at 0.
pub const DEFAULT_BATCH_SIZE: usize = 25;
