//! Build context supplied by the deployment pipeline.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use distpush_transfer::TransferClient;

/// What the build hands to the upload step.
#[derive(Clone, Default)]
pub struct BuildContext {
    /// Build output directory; file paths are relative to it.
    pub dist_dir: PathBuf,
    pub dist_files: Vec<String>,
    /// Files an earlier step gzipped in place.
    pub gzipped_files: Vec<String>,
    /// Files an earlier step brotli-compressed in place.
    pub brotli_compressed_files: Vec<String>,
    pub manifest_path: Option<PathBuf>,
    /// Replaces the host's default transfer client when set.
    pub upload_client: Option<Arc<dyn TransferClient>>,
}

impl BuildContext {
    pub fn new(dist_dir: impl Into<PathBuf>, dist_files: Vec<String>) -> Self {
        Self {
            dist_dir: dist_dir.into(),
            dist_files,
            ..Self::default()
        }
    }

    pub fn with_gzipped_files(mut self, files: Vec<String>) -> Self {
        self.gzipped_files = files;
        self
    }

    pub fn with_brotli_compressed_files(mut self, files: Vec<String>) -> Self {
        self.brotli_compressed_files = files;
        self
    }

    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = Some(path.into());
        self
    }

    pub fn with_upload_client(mut self, client: Arc<dyn TransferClient>) -> Self {
        self.upload_client = Some(client);
        self
    }
}

impl fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildContext")
            .field("dist_dir", &self.dist_dir)
            .field("dist_files", &self.dist_files.len())
            .field("gzipped_files", &self.gzipped_files.len())
            .field("brotli_compressed_files", &self.brotli_compressed_files.len())
            .field("manifest_path", &self.manifest_path)
            .field("upload_client", &self.upload_client.is_some())
            .finish()
    }
}
