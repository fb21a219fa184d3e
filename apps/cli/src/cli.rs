//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use distpush_config::DeployOptions;

/// Upload a build output directory to a bucket.
#[derive(Clone, Debug, Parser)]
#[command(name = "distpush", version)]
pub struct Cli {
    /// Deploy options file (TOML)
    #[arg(long, short = 'c', default_value = "distpush.toml")]
    pub config: PathBuf,

    /// Build output directory to upload
    #[arg(long, default_value = "dist")]
    pub dist_dir: PathBuf,

    /// Directory holding the local buckets objects are written to
    #[arg(long, default_value = ".distpush/buckets")]
    pub bucket_root: PathBuf,

    /// Dist-relative file that was gzipped in place (repeatable)
    #[arg(long = "gzipped", value_name = "PATH")]
    pub gzipped: Vec<String>,

    /// Dist-relative file that was brotli-compressed in place (repeatable)
    #[arg(long = "brotli", value_name = "PATH")]
    pub brotli: Vec<String>,

    /// Manifest path passed through to the transfer client
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Override the configured bucket
    #[arg(long)]
    pub bucket: Option<String>,

    /// Override the configured region
    #[arg(long)]
    pub region: Option<String>,

    /// Override the configured key prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Print the transfer request as JSON instead of uploading
    #[arg(long)]
    pub dry_run: bool,

    /// Log per-batch progress
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Applies command-line overrides on top of file options.
    pub fn apply_overrides(&self, options: &mut DeployOptions) {
        if let Some(bucket) = &self.bucket {
            options.bucket = bucket.clone();
        }
        if let Some(region) = &self.region {
            options.region = region.clone();
        }
        if let Some(prefix) = &self.prefix {
            options.prefix = prefix.clone();
        }
    }
}
