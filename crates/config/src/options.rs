//! Resolved deploy options with their defaults.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use distpush_transfer::{CannedAcl, ServerSideEncryption};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Broad asset-extension include pattern.
pub const DEFAULT_FILE_PATTERN: &str =
    "**/*.{js,css,png,gif,ico,jpg,webp,map,xml,txt,svg,swf,eot,ttf,woff,woff2,otf,wasm,json}";

/// Two years, public.
pub const DEFAULT_CACHE_CONTROL: &str = "max-age=63072000, public";

pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// 2030-01-01T00:00:00Z.
const DEFAULT_EXPIRES_EPOCH_SECS: i64 = 1_893_456_000;

/// How the orchestrator treats transfer errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RetryMode {
    /// Every failure counts against the retry budget.
    #[default]
    RetryAll,
    /// Errors that are not retryable end the upload immediately.
    FailFast,
}

/// Deploy options as read from the host configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeployOptions {
    /// Destination bucket. Required.
    #[serde(default)]
    pub bucket: String,
    /// Bucket region. Required.
    #[serde(default)]
    pub region: String,
    #[serde(default = "default_file_pattern")]
    pub file_pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_ignore_pattern: Option<String>,
    #[serde(default)]
    pub prefix: String,
    /// Credential profile name, resolved by the host.
    #[serde(default)]
    pub profile: String,
    #[serde(default)]
    pub acl: CannedAcl,
    #[serde(default = "default_cache_control")]
    pub cache_control: String,
    #[serde(default = "default_expires")]
    pub expires: DateTime<Utc>,
    #[serde(default)]
    pub dot_folders: bool,
    #[serde(default)]
    pub batch_size: usize,
    #[serde(default = "default_mime_type")]
    pub default_mime_type: String,
    #[serde(default = "default_min_retry_ms")]
    pub min_retry_ms: u64,
    #[serde(default = "default_max_retry_ms")]
    pub max_retry_ms: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_side_encryption: Option<ServerSideEncryption>,
    #[serde(default)]
    pub retry_mode: RetryMode,
}

fn default_file_pattern() -> String {
    DEFAULT_FILE_PATTERN.into()
}

fn default_cache_control() -> String {
    DEFAULT_CACHE_CONTROL.into()
}

fn default_expires() -> DateTime<Utc> {
    DateTime::from_timestamp(DEFAULT_EXPIRES_EPOCH_SECS, 0).unwrap_or_default()
}

fn default_mime_type() -> String {
    DEFAULT_MIME_TYPE.into()
}

fn default_min_retry_ms() -> u64 {
    10_000
}

fn default_max_retry_ms() -> u64 {
    5 * 60 * 1000
}

fn default_max_retries() -> u32 {
    10
}

impl Default for DeployOptions {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: String::new(),
            file_pattern: default_file_pattern(),
            file_ignore_pattern: None,
            prefix: String::new(),
            profile: String::new(),
            acl: CannedAcl::default(),
            cache_control: default_cache_control(),
            expires: default_expires(),
            dot_folders: false,
            batch_size: 0,
            default_mime_type: default_mime_type(),
            min_retry_ms: default_min_retry_ms(),
            max_retry_ms: default_max_retry_ms(),
            max_retries: default_max_retries(),
            server_side_encryption: None,
            retry_mode: RetryMode::default(),
        }
    }
}

impl DeployOptions {
    /// Options for `bucket` in `region`, everything else defaulted.
    pub fn new(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            ..Self::default()
        }
    }

    /// Parses options from a TOML document. Does not validate.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads and validates options from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let options = Self::from_toml_str(&content)?;
        options.validate()?;
        tracing::debug!(path = %path.display(), bucket = %options.bucket, "deploy options loaded");
        Ok(options)
    }

    /// Checks the preconditions the deploy core relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket.trim().is_empty() {
            return Err(ConfigError::MissingRequired("bucket"));
        }
        if self.region.trim().is_empty() {
            return Err(ConfigError::MissingRequired("region"));
        }
        if self.min_retry_ms > self.max_retry_ms {
            return Err(ConfigError::Invalid(format!(
                "min_retry_ms ({}) exceeds max_retry_ms ({})",
                self.min_retry_ms, self.max_retry_ms
            )));
        }
        Ok(())
    }

    pub fn min_retry(&self) -> Duration {
        Duration::from_millis(self.min_retry_ms)
    }

    pub fn max_retry(&self) -> Duration {
        Duration::from_millis(self.max_retry_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = DeployOptions::default();
        assert_eq!(options.file_pattern, DEFAULT_FILE_PATTERN);
        assert_eq!(options.file_ignore_pattern, None);
        assert_eq!(options.prefix, "");
        assert_eq!(options.acl, CannedAcl::PublicRead);
        assert_eq!(options.cache_control, "max-age=63072000, public");
        assert_eq!(options.expires.to_rfc3339(), "2030-01-01T00:00:00+00:00");
        assert!(!options.dot_folders);
        assert_eq!(options.batch_size, 0);
        assert_eq!(options.default_mime_type, "application/octet-stream");
        assert_eq!(options.min_retry(), Duration::from_secs(10));
        assert_eq!(options.max_retry(), Duration::from_secs(300));
        assert_eq!(options.max_retries, 10);
        assert_eq!(options.server_side_encryption, None);
        assert_eq!(options.retry_mode, RetryMode::RetryAll);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let options = DeployOptions::from_toml_str(
            r#"
            bucket = "site-assets"
            region = "eu-west-1"
            prefix = "release-42"
            file_ignore_pattern = "*.map"
            acl = "private"
            server_side_encryption = "AES256"
            retry_mode = "fail-fast"
            "#,
        )
        .unwrap();

        assert_eq!(options.bucket, "site-assets");
        assert_eq!(options.prefix, "release-42");
        assert_eq!(options.file_ignore_pattern.as_deref(), Some("*.map"));
        assert_eq!(options.acl, CannedAcl::Private);
        assert_eq!(options.server_side_encryption, Some(ServerSideEncryption::Aes256));
        assert_eq!(options.retry_mode, RetryMode::FailFast);
        assert_eq!(options.max_retries, 10);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn expires_parses_rfc3339() {
        let options = DeployOptions::from_toml_str(
            r#"
            bucket = "b"
            region = "r"
            expires = "2031-06-01T12:00:00Z"
            "#,
        )
        .unwrap();
        assert_eq!(options.expires.to_rfc3339(), "2031-06-01T12:00:00+00:00");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = DeployOptions::from_toml_str("bukket = \"typo\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_bucket_or_region() {
        let err = DeployOptions::new("", "us-east-1").validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired("bucket")));

        let err = DeployOptions::new("assets", " ").validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired("region")));
    }

    #[test]
    fn inverted_retry_bounds_are_rejected() {
        let mut options = DeployOptions::new("assets", "us-east-1");
        options.min_retry_ms = 60_000;
        options.max_retry_ms = 1_000;
        assert!(matches!(options.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deploy.toml");
        std::fs::write(&path, "bucket = \"assets\"\nregion = \"us-east-1\"\nbatch_size = 50\n")
            .unwrap();

        let options = DeployOptions::load(&path).unwrap();
        assert_eq!(options.batch_size, 50);
    }

    #[test]
    fn load_missing_file() {
        let err = DeployOptions::load(Path::new("/nonexistent/deploy.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deploy.toml");
        std::fs::write(&path, "region = \"us-east-1\"\n").unwrap();
        assert!(matches!(
            DeployOptions::load(&path),
            Err(ConfigError::MissingRequired("bucket"))
        ));
    }
}
