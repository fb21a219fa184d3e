//! Deploy configuration surface.
//!
//! [`DeployOptions`] is the resolved option set a host reads from its
//! config file; [`BuildContext`] is what the build pipeline hands over
//! (dist directory, file lists, manifest path, optional upload client).
//!
//! Options are stored as TOML:
//!
//! ```toml
//! bucket = "site-assets"
//! region = "eu-west-1"
//! prefix = "release-42"
//! file_ignore_pattern = "*.map"
//! ```

mod context;
mod error;
mod options;

pub use context::BuildContext;
pub use error::ConfigError;
pub use options::{
    DEFAULT_CACHE_CONTROL, DEFAULT_FILE_PATTERN, DEFAULT_MIME_TYPE, DeployOptions, RetryMode,
};
