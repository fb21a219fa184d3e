//! Filesystem-backed bucket.
//!
//! Stores each object at `<root>/<bucket>/<key>` with a JSON sidecar
//! `<key>.meta.json` holding the headers an object store would keep. Used
//! for dry runs and tests; it speaks no object-store protocol.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use futures_util::future::try_join_all;
use futures_util::{StreamExt, stream};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::DEFAULT_BATCH_SIZE;
use crate::client::{BatchStream, TransferClient};
use crate::content_type::{content_encoding, detect_content_type};
use crate::error::TransferError;
use crate::types::{BatchCompletion, CannedAcl, ServerSideEncryption, TransferRequest};
use crate::validation::validate_object_path;

const METADATA_SUFFIX: &str = ".meta.json";

/// Headers recorded alongside each stored object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMetadata {
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_encoding: Option<String>,
    pub cache_control: String,
    pub expires: DateTime<Utc>,
    pub acl: CannedAcl,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_side_encryption: Option<ServerSideEncryption>,
}

/// Transfer client writing objects into a local directory tree.
#[derive(Debug, Clone)]
pub struct LocalBucketClient {
    root: PathBuf,
}

impl LocalBucketClient {
    /// Creates a client storing buckets under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Where the object `key` of `bucket` lives on disk.
    pub fn object_path(&self, bucket: &str, key: &str) -> PathBuf {
        self.root.join(bucket).join(key)
    }

    /// Reads the sidecar metadata of a stored object.
    pub async fn read_metadata(
        &self,
        bucket: &str,
        key: &str,
    ) -> Result<ObjectMetadata, TransferError> {
        let path = metadata_path(&self.object_path(bucket, key));
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| TransferError::io(path.display().to_string(), e))?;
        serde_json::from_slice(&bytes).map_err(|e| TransferError::Other(e.to_string()))
    }

    async fn put_object(
        &self,
        request: &TransferRequest,
        path: &str,
    ) -> Result<String, TransferError> {
        validate_object_path(path)?;

        let source = request.cwd.join(path);
        let key = request.key_for(path);
        let dest = self.object_path(&request.bucket, &key);

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| TransferError::io(parent.display().to_string(), e))?;
        }
        tokio::fs::copy(&source, &dest)
            .await
            .map_err(|e| TransferError::io(path, e))?;

        let metadata = ObjectMetadata {
            content_type: detect_content_type(path)
                .map(str::to_string)
                .unwrap_or_else(|| request.default_mime_type.clone()),
            content_encoding: content_encoding(path, &request.files.gzipped, &request.files.brotli)
                .map(str::to_string),
            cache_control: request.cache_control.clone(),
            expires: request.expires,
            acl: request.acl,
            server_side_encryption: request.server_side_encryption,
        };
        let json = serde_json::to_vec_pretty(&metadata)
            .map_err(|e| TransferError::Other(e.to_string()))?;
        let meta_path = metadata_path(&dest);
        tokio::fs::write(&meta_path, json)
            .await
            .map_err(|e| TransferError::io(meta_path.display().to_string(), e))?;

        trace!(bucket = %request.bucket, key = %key, "object stored");
        Ok(path.to_string())
    }
}

fn metadata_path(object: &Path) -> PathBuf {
    let mut name: OsString = object.as_os_str().to_owned();
    name.push(METADATA_SUFFIX);
    PathBuf::from(name)
}

impl TransferClient for LocalBucketClient {
    fn upload<'a>(&'a self, request: &'a TransferRequest) -> BatchStream<'a> {
        if request.bucket.is_empty() || request.bucket.contains('/') {
            let err = TransferError::InvalidRequest(format!(
                "invalid bucket name `{}`",
                request.bucket
            ));
            return stream::once(async move { Err::<BatchCompletion, _>(err) }).boxed();
        }

        let batch_size = match request.batch_size {
            0 => DEFAULT_BATCH_SIZE,
            n => n,
        };
        if let Some(manifest) = &request.manifest_path {
            debug!(manifest = %manifest.display(), "manifest path passed through");
        }

        let batches: Vec<Vec<String>> = request
            .files
            .primary
            .chunks(batch_size)
            .map(<[String]>::to_vec)
            .collect();

        debug!(
            bucket = %request.bucket,
            files = request.files.primary.len(),
            batches = batches.len(),
            "starting local transfer"
        );

        stream::iter(batches)
            .then(move |batch| async move {
                let uploaded =
                    try_join_all(batch.iter().map(|path| self.put_object(request, path))).await?;
                Ok::<_, TransferError>(BatchCompletion::new(uploaded))
            })
            .boxed()
    }
}
