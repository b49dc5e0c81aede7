use std::path::PathBuf;

use thiserror::Error;

pub use stowage_backend::{StorageError, StorageResult};

/// Errors from reading or writing a [`StorageConfig`](crate::StorageConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
