//! Configuration error types.

use std::path::PathBuf;

/// Errors raised while loading or validating deploy options.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required config value `{0}`")]
    MissingRequired(&'static str),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
