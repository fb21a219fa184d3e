//! distpush entry point.

mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use distpush_config::{BuildContext, DeployOptions};
use distpush_deploy::{UploadEvent, build_transfer_request, select_files, upload};
use distpush_selection::scan_dist_dir;
use distpush_transfer::LocalBucketClient;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize structured logging.
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting distpush");

    let options = load_options(&cli)?;
    let context = build_context(&cli)?;

    if cli.dry_run {
        println!("{}", render_request(&context, &options)?);
        return Ok(());
    }

    let (events_tx, events_rx) = mpsc::channel(256);
    let reporter = tokio::spawn(report_events(events_rx));

    let client = Arc::new(LocalBucketClient::new(&cli.bucket_root));
    let result = upload(&context, &options, client, Some(events_tx)).await;
    let _ = reporter.await;

    let result = result.context("deploy failed")?;
    tracing::info!(
        bucket = %options.bucket,
        attempts = result.attempts,
        files = result.file_count(),
        "deploy finished"
    );
    Ok(())
}

fn load_options(cli: &Cli) -> anyhow::Result<DeployOptions> {
    let content = std::fs::read_to_string(&cli.config)
        .with_context(|| format!("failed to read {}", cli.config.display()))?;
    let mut options = DeployOptions::from_toml_str(&content)?;
    cli.apply_overrides(&mut options);
    options.validate()?;
    tracing::info!(bucket = %options.bucket, region = %options.region, "configuration loaded");
    Ok(options)
}

fn build_context(cli: &Cli) -> anyhow::Result<BuildContext> {
    let files = scan_dist_dir(&cli.dist_dir)
        .with_context(|| format!("failed to scan {}", cli.dist_dir.display()))?;

    let mut context = BuildContext::new(&cli.dist_dir, files)
        .with_gzipped_files(cli.gzipped.clone())
        .with_brotli_compressed_files(cli.brotli.clone());
    if let Some(manifest) = &cli.manifest {
        context = context.with_manifest_path(manifest);
    }
    Ok(context)
}

/// Renders the transfer request a real run would hand to the client.
fn render_request(context: &BuildContext, options: &DeployOptions) -> anyhow::Result<String> {
    let files = select_files(context, options)?;
    let request = build_transfer_request(options, context, files);
    Ok(serde_json::to_string_pretty(&request)?)
}

/// Logs upload events as they arrive.
async fn report_events(mut events_rx: mpsc::Receiver<UploadEvent>) {
    while let Some(event) = events_rx.recv().await {
        match event {
            UploadEvent::Preparing { bucket, files } => {
                tracing::info!(%bucket, files, "preparing upload");
            }
            UploadEvent::AttemptStarted { attempt } => {
                tracing::debug!(attempt, "attempt started");
            }
            UploadEvent::BatchUploaded { attempt, files } => {
                tracing::debug!(attempt, files, "batch uploaded");
            }
            UploadEvent::RetryScheduled {
                retry,
                delay,
                error,
            } => {
                tracing::warn!(
                    retry,
                    delay_secs = format_args!("{:.1}", delay.as_secs_f64()),
                    %error,
                    "retry scheduled"
                );
            }
            UploadEvent::Completed { attempts, files } => {
                tracing::info!(attempts, files, "upload completed");
            }
            UploadEvent::Failed { attempts, error } => {
                tracing::error!(attempts, %error, "upload failed");
            }
        }
    }
}
