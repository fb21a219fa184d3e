//! Upload entry point wiring selection, request assembly and the
//! orchestrator together.

use std::sync::Arc;

use distpush_config::{BuildContext, DeployOptions};
use distpush_selection::{FileSet, PathFilter};
use distpush_transfer::TransferClient;
use tokio::sync::mpsc;
use tracing::debug;

use crate::backoff::RetryPolicy;
use crate::builder::build_transfer_request;
use crate::error::UploadError;
use crate::orchestrator::UploadOrchestrator;
use crate::types::{UploadEvent, UploadResult};

/// Derives the upload set from the build context and options.
pub fn select_files(
    context: &BuildContext,
    options: &DeployOptions,
) -> Result<FileSet, UploadError> {
    let filter = PathFilter::new(
        &options.file_pattern,
        options.file_ignore_pattern.as_deref(),
        options.dot_folders,
    )?;

    Ok(FileSet::select(
        &context.dist_files,
        context.gzipped_files.clone(),
        context.brotli_compressed_files.clone(),
        &filter,
    ))
}

/// Uploads the selected dist files.
///
/// `default_client` is used unless the context carries its own upload
/// client. Options are validated first, so a missing bucket or region fails
/// before any selection or transfer work.
pub async fn upload(
    context: &BuildContext,
    options: &DeployOptions,
    default_client: Arc<dyn TransferClient>,
    events_tx: Option<mpsc::Sender<UploadEvent>>,
) -> Result<UploadResult, UploadError> {
    options.validate()?;

    let files = select_files(context, options)?;
    let request = build_transfer_request(options, context, files);

    let client = context.upload_client.clone().unwrap_or(default_client);
    let mut orchestrator = UploadOrchestrator::new(client, RetryPolicy::from_options(options));
    if let Some(tx) = events_tx {
        let _ = tx
            .send(UploadEvent::Preparing {
                bucket: request.bucket.clone(),
                files: request.files.primary.len(),
            })
            .await;
        orchestrator = orchestrator.with_events(tx);
    }

    debug!(
        bucket = %request.bucket,
        region = %options.region,
        files = request.files.primary.len(),
        "preparing to upload to bucket `{}`",
        request.bucket
    );

    orchestrator.run(&request).await
}
