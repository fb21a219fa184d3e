//! Retrying upload orchestrator.
//!
//! Runs whole-transfer attempts against a [`TransferClient`] one at a time.
//! A failed attempt is retried in full after a randomized backoff; batch
//! records from failed attempts are discarded because the client restarts
//! the whole transfer on every call.

use std::sync::Arc;

use distpush_transfer::{BatchCompletion, TransferClient, TransferError, TransferRequest};
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::backoff::RetryPolicy;
use crate::error::UploadError;
use crate::types::{UploadEvent, UploadResult};

/// Per-run retry bookkeeping.
#[derive(Debug, Default)]
struct RetryState {
    /// Retries made so far (0 during the first attempt).
    retries: u32,
    /// Batch records of the current attempt.
    results: Vec<BatchCompletion>,
}

impl RetryState {
    fn attempt(&self) -> u32 {
        self.retries + 1
    }

    fn begin_attempt(&mut self) {
        self.results.clear();
    }
}

/// Drives a transfer client to completion with bounded retries.
pub struct UploadOrchestrator {
    client: Arc<dyn TransferClient>,
    policy: RetryPolicy,
    events_tx: Option<mpsc::Sender<UploadEvent>>,
}

impl UploadOrchestrator {
    /// Creates an orchestrator over `client`.
    pub fn new(client: Arc<dyn TransferClient>, policy: RetryPolicy) -> Self {
        Self {
            client,
            policy,
            events_tx: None,
        }
    }

    /// Forwards [`UploadEvent`]s to `events_tx`. A dropped receiver is
    /// ignored.
    pub fn with_events(mut self, events_tx: mpsc::Sender<UploadEvent>) -> Self {
        self.events_tx = Some(events_tx);
        self
    }

    /// Uploads everything in `request`, retrying failed attempts.
    ///
    /// Resolves with the batch records of the successful attempt. Fails
    /// once the retry budget is spent, wrapping the last transfer error.
    pub async fn run(&self, request: &TransferRequest) -> Result<UploadResult, UploadError> {
        let mut state = RetryState::default();

        loop {
            let attempt = state.attempt();
            state.begin_attempt();
            self.emit(UploadEvent::AttemptStarted { attempt }).await;

            let err = match self.run_attempt(request, &mut state).await {
                Ok(()) => {
                    let result = UploadResult {
                        attempts: attempt,
                        batches: std::mem::take(&mut state.results),
                    };
                    info!(
                        bucket = %request.bucket,
                        attempts = attempt,
                        files = result.file_count(),
                        "upload completed"
                    );
                    self.emit(UploadEvent::Completed {
                        attempts: attempt,
                        files: result.file_count(),
                    })
                    .await;
                    return Ok(result);
                }
                Err(err) => err,
            };

            if !self.policy.allows_retry(state.retries, &err) {
                let failure = if state.retries < self.policy.max_retries {
                    UploadError::Fatal {
                        attempts: attempt,
                        source: err,
                    }
                } else {
                    UploadError::Exhausted {
                        attempts: attempt,
                        source: err,
                    }
                };
                error!(bucket = %request.bucket, attempts = attempt, error = ?failure, "{failure}");
                self.emit(UploadEvent::Failed {
                    attempts: attempt,
                    error: failure.to_string(),
                })
                .await;
                return Err(failure);
            }

            state.retries += 1;
            let delay = self
                .policy
                .delay_for_retry(state.retries, &mut rand::thread_rng());

            warn!(
                bucket = %request.bucket,
                attempt,
                retry = state.retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "upload attempt failed, retrying"
            );
            self.emit(UploadEvent::RetryScheduled {
                retry: state.retries,
                delay,
                error: err.to_string(),
            })
            .await;

            tokio::time::sleep(delay).await;
        }
    }

    /// One full invocation of the transfer client.
    async fn run_attempt(
        &self,
        request: &TransferRequest,
        state: &mut RetryState,
    ) -> Result<(), TransferError> {
        let attempt = state.attempt();
        let mut batches = self.client.upload(request);

        while let Some(batch) = batches.next().await {
            let batch = batch?;
            debug!(attempt, files = batch.len(), "uploaded {} files ok", batch.len());
            self.emit(UploadEvent::BatchUploaded {
                attempt,
                files: batch.len(),
            })
            .await;
            state.results.push(batch);
        }

        Ok(())
    }

    async fn emit(&self, event: UploadEvent) {
        if let Some(tx) = &self.events_tx {
            let _ = tx.send(event).await;
        }
    }
}
