use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use distpush_selection::FileSet;
use serde::{Deserialize, Serialize};

/// Canned object ACL applied to every uploaded object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CannedAcl {
    Private,
    #[default]
    PublicRead,
    PublicReadWrite,
    AuthenticatedRead,
    AwsExecRead,
    BucketOwnerRead,
    BucketOwnerFullControl,
    LogDeliveryWrite,
}

impl CannedAcl {
    pub fn as_str(&self) -> &'static str {
        match self {
            CannedAcl::Private => "private",
            CannedAcl::PublicRead => "public-read",
            CannedAcl::PublicReadWrite => "public-read-write",
            CannedAcl::AuthenticatedRead => "authenticated-read",
            CannedAcl::AwsExecRead => "aws-exec-read",
            CannedAcl::BucketOwnerRead => "bucket-owner-read",
            CannedAcl::BucketOwnerFullControl => "bucket-owner-full-control",
            CannedAcl::LogDeliveryWrite => "log-delivery-write",
        }
    }
}

impl fmt::Display for CannedAcl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server-side encryption mode requested for uploaded objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerSideEncryption {
    #[serde(rename = "AES256")]
    Aes256,
    #[serde(rename = "aws:kms")]
    AwsKms,
    #[serde(rename = "aws:kms:dsse")]
    AwsKmsDsse,
}

impl ServerSideEncryption {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerSideEncryption::Aes256 => "AES256",
            ServerSideEncryption::AwsKms => "aws:kms",
            ServerSideEncryption::AwsKmsDsse => "aws:kms:dsse",
        }
    }
}

impl fmt::Display for ServerSideEncryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a transfer client needs to upload one dist directory.
///
/// Built once per run and only ever shared by reference. Every attempt of a
/// run sends the same request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Directory the file paths are relative to.
    pub cwd: PathBuf,
    pub files: FileSet,
    pub bucket: String,
    /// Key prefix, joined to each path with `/` when non-empty.
    pub prefix: String,
    pub acl: CannedAcl,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_path: Option<PathBuf>,
    pub cache_control: String,
    pub expires: DateTime<Utc>,
    /// Present only when encryption was configured; clients treat presence
    /// itself as a request to encrypt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_side_encryption: Option<ServerSideEncryption>,
    /// Files per batch; 0 lets the client choose.
    pub batch_size: usize,
    /// Content type used when none can be inferred from the file name.
    pub default_mime_type: String,
}

impl TransferRequest {
    /// Object key for a dist-relative path.
    pub fn key_for(&self, path: &str) -> String {
        object_key(&self.prefix, path)
    }
}

/// Joins a key prefix and a relative path.
pub fn object_key(prefix: &str, path: &str) -> String {
    if prefix.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", prefix.trim_end_matches('/'), path)
    }
}

/// Files confirmed uploaded by one batch of a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCompletion {
    pub files_uploaded: Vec<String>,
}

impl BatchCompletion {
    pub fn new(files_uploaded: Vec<String>) -> Self {
        Self { files_uploaded }
    }

    pub fn len(&self) -> usize {
        self.files_uploaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files_uploaded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_with_and_without_prefix() {
        assert_eq!(object_key("", "assets/app.js"), "assets/app.js");
        assert_eq!(object_key("v2", "assets/app.js"), "v2/assets/app.js");
        assert_eq!(object_key("v2/", "app.js"), "v2/app.js");
    }

    #[test]
    fn acl_serializes_kebab_case() {
        let json = serde_json::to_string(&CannedAcl::BucketOwnerFullControl).unwrap();
        assert_eq!(json, "\"bucket-owner-full-control\"");
        assert_eq!(CannedAcl::default(), CannedAcl::PublicRead);
        assert_eq!(CannedAcl::PublicRead.to_string(), "public-read");
    }

    #[test]
    fn sse_uses_wire_names() {
        let parsed: ServerSideEncryption = serde_json::from_str("\"aws:kms\"").unwrap();
        assert_eq!(parsed, ServerSideEncryption::AwsKms);
        assert_eq!(ServerSideEncryption::Aes256.to_string(), "AES256");
    }
}
