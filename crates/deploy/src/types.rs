//! Data types for the upload flow.

use std::time::Duration;

use distpush_transfer::BatchCompletion;

/// Structured progress event emitted during an upload.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    /// About to start the first attempt.
    Preparing { bucket: String, files: usize },
    /// A transfer-client invocation began (1-based).
    AttemptStarted { attempt: u32 },
    /// A batch finished within the current attempt.
    BatchUploaded { attempt: u32, files: usize },
    /// The attempt failed and another one is scheduled after `delay`.
    RetryScheduled {
        retry: u32,
        delay: Duration,
        error: String,
    },
    /// An attempt completed; the upload is done.
    Completed { attempts: u32, files: usize },
    /// No further attempts will be made.
    Failed { attempts: u32, error: String },
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    /// Transfer-client invocations made, including failed ones.
    pub attempts: u32,
    /// Batch records of the successful attempt, in arrival order.
    pub batches: Vec<BatchCompletion>,
}

impl UploadResult {
    /// Total files confirmed uploaded.
    pub fn file_count(&self) -> usize {
        self.batches.iter().map(BatchCompletion::len).sum()
    }

    /// All confirmed file identifiers, flattened in arrival order.
    pub fn files_uploaded(&self) -> impl Iterator<Item = &str> {
        self.batches
            .iter()
            .flat_map(|b| b.files_uploaded.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_flattens_batches() {
        let result = UploadResult {
            attempts: 1,
            batches: vec![
                BatchCompletion::new(vec!["a.js".into(), "b.js".into()]),
                BatchCompletion::new(vec!["c.css".into()]),
            ],
        };
        assert_eq!(result.file_count(), 3);
        assert_eq!(
            result.files_uploaded().collect::<Vec<_>>(),
            vec!["a.js", "b.js", "c.css"]
        );
    }
}
