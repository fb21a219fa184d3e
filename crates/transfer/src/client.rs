//! Transfer client trait.
//!
//! Implemented by whatever actually talks to the object store. Keeping the
//! boundary a trait lets the deploy core run against mocks in tests and
//! against caller-supplied clients in production.

use futures_util::stream::BoxStream;

use crate::error::TransferError;
use crate::types::{BatchCompletion, TransferRequest};

/// Lazy, finite stream of batch completions for one attempt.
///
/// The stream ends after the last batch, or yields an `Err` for the batch
/// that could not be completed. It is not restartable.
pub type BatchStream<'a> = BoxStream<'a, Result<BatchCompletion, TransferError>>;

/// Abstract object-store upload client.
pub trait TransferClient: Send + Sync {
    /// Starts uploading every file described by `request`.
    ///
    /// Each call begins a brand-new transfer of the whole set; clients are
    /// not expected to resume an earlier call.
    fn upload<'a>(&'a self, request: &'a TransferRequest) -> BatchStream<'a>;
}
