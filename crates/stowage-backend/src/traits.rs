//! The [`Backend`] trait every storage strategy implements.
//!
//! A backend owns one document of string keys and string values plus the
//! location it lives at. Typed values cross this boundary as [`Value`] and
//! are stored in canonical string form, so any backend gets coercion and
//! [`StorageError::TypeMismatch`] from the provided `load`.

use std::path::{Path, PathBuf};

use stowage_types::Value;
use tracing::warn;

use crate::codec::Document;
use crate::error::{StorageError, StorageResult};

/// Storage strategy behind a facade.
///
/// Implementations must be thread-safe (`Send + Sync`) so one instance can be
/// shared as `Arc<dyn Backend>`. That only makes sharing sound; it does not
/// coordinate writers. Two overlapping saves may each read the same document
/// and the later write wins.
///
/// Absence is never an error: a missing key or missing document reads as
/// `None`, loads as the default, and deletes as a no-op.
pub trait Backend: Send + Sync {
    /// Read the raw stored string for `key`.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value and creating
    /// the document if needed.
    fn save(&self, key: &str, value: &Value) -> StorageResult<()>;

    /// Remove `key`. Returns `Ok(true)` if it existed, `Ok(false)` if the key
    /// or the whole document was absent.
    fn delete(&self, key: &str) -> StorageResult<bool>;

    /// A copy of the whole document. Empty when nothing has been stored.
    fn entries(&self) -> StorageResult<Document>;

    /// Directory the document lives in.
    fn path(&self) -> PathBuf;

    /// Change the directory. Takes effect on the next operation.
    fn set_path(&self, path: &Path);

    /// File name of the document.
    fn file_name(&self) -> String;

    /// Change the file name. Takes effect on the next operation.
    fn set_file_name(&self, file_name: &str);

    /// Full path of the document.
    fn location(&self) -> PathBuf {
        self.path().join(self.file_name())
    }

    /// Load `key` coerced to the kind of `default`, or `default` itself when
    /// the key is absent.
    fn load(&self, key: &str, default: Value) -> StorageResult<Value> {
        match self.read(key)? {
            Some(raw) => default.kind().parse(&raw).map_err(|source| {
                warn!(key, expected = %default.kind(), "stored value has the wrong kind");
                StorageError::TypeMismatch {
                    key: key.to_string(),
                    source,
                }
            }),
            None => Ok(default),
        }
    }

    /// All stored keys, sorted.
    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.entries()?.into_keys().collect())
    }

    /// Whether `key` is present.
    fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.read(key)?.is_some())
    }
}
