use std::path::{Path, PathBuf};

use stowage_types::ValueError;

/// Errors from backend and facade operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The persisted file exists but does not decode to a document.
    #[error("malformed document at {}: {reason}", location.display())]
    MalformedDocument { location: PathBuf, reason: String },

    /// A stored value cannot be read as the kind the caller asked for.
    #[error("type mismatch for key {key:?}: {source}")]
    TypeMismatch { key: String, source: ValueError },

    /// No backend instance is bound in the registry.
    #[error("no backend bound for {type_name}")]
    BackendNotBound { type_name: &'static str },

    /// I/O error from the underlying medium.
    #[error("I/O error at {}: {source}", location.display())]
    Io {
        location: PathBuf,
        source: std::io::Error,
    },

    /// The document could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// A backend's internal lock was poisoned by a panicking writer.
    #[error("backend lock poisoned")]
    Poisoned,
}

impl StorageError {
    pub(crate) fn io(location: &Path, source: std::io::Error) -> Self {
        Self::Io {
            location: location.to_path_buf(),
            source,
        }
    }

    /// Returns `true` for [`StorageError::MalformedDocument`].
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedDocument { .. })
    }

    /// Returns `true` for [`StorageError::TypeMismatch`].
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }
}

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
