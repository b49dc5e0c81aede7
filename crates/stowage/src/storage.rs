//! The [`Storage`] facade.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use stowage_backend::{Backend, Document, FileBackend};
use stowage_registry::{Registry, RegistryError};
use stowage_types::{Scalar, Value};
use tracing::debug;

use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};

/// Typed entry point to the active backend.
///
/// `Storage` holds nothing but a handle to its backend. It never touches the
/// file system itself; location changes are forwarded and take effect on the
/// backend's next call.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn Backend>,
}

impl Storage {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Build the backend described by `config`.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.build_backend())
    }

    /// Use the `Arc<dyn Backend>` bound in `registry`.
    ///
    /// A missing binding is logged by the registry and returned as
    /// [`StorageError::BackendNotBound`].
    pub fn from_registry(registry: &Registry) -> StorageResult<Self> {
        registry
            .try_resolve::<Arc<dyn Backend>>()
            .map(Self::new)
            .map_err(|e| match e {
                RegistryError::NotBound { type_name } => {
                    StorageError::BackendNotBound { type_name }
                }
            })
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    /// Replace the active backend. Requires exclusive access, so it cannot
    /// race with calls through this facade.
    pub fn set_backend(&mut self, backend: Arc<dyn Backend>) {
        self.backend = backend;
    }

    // ---- Location ----

    pub fn set_path(&self, path: impl AsRef<Path>) {
        self.backend.set_path(path.as_ref());
    }

    pub fn set_file_name(&self, file_name: &str) {
        self.backend.set_file_name(file_name);
    }

    pub fn path(&self) -> PathBuf {
        self.backend.path()
    }

    pub fn file_name(&self) -> String {
        self.backend.file_name()
    }

    pub fn location(&self) -> PathBuf {
        self.backend.location()
    }

    // ---- Values ----

    /// Store `value` under `key`.
    pub fn save(&self, key: &str, value: impl Into<Value>) -> StorageResult<()> {
        self.backend.save(key, &value.into())
    }

    /// Load `key` as the type of `default`, or `default` if absent.
    ///
    /// ```no_run
    /// # use stowage::Storage;
    /// # fn demo(storage: &Storage) -> stowage::StorageResult<()> {
    /// let score: i32 = storage.load("score", 0)?;
    /// let name: String = storage.load("name", "anonymous")?;
    /// # Ok(()) }
    /// ```
    pub fn load<T: Scalar>(&self, key: &str, default: T) -> StorageResult<T::Owned> {
        let value = self.backend.load(key, default.into())?;
        T::from_value(value).map_err(|source| StorageError::TypeMismatch {
            key: key.to_string(),
            source,
        })
    }

    /// Load with a dynamically typed default.
    pub fn load_value(&self, key: &str, default: Value) -> StorageResult<Value> {
        self.backend.load(key, default)
    }

    /// Load a text value and report whether the key was present.
    ///
    /// Presence is checked directly, so a stored value equal to `default`
    /// still reports `true`.
    pub fn try_load(&self, key: &str, default: &str) -> StorageResult<(bool, String)> {
        let loaded = match self.backend.read(key)? {
            Some(raw) => (true, raw),
            None => (false, default.to_string()),
        };
        debug!(key, found = loaded.0, "try_load");
        Ok(loaded)
    }

    /// Remove `key`. Returns whether it was present; absence is not an error.
    pub fn delete(&self, key: &str) -> StorageResult<bool> {
        self.backend.delete(key)
    }

    pub fn contains(&self, key: &str) -> StorageResult<bool> {
        self.backend.contains(key)
    }

    pub fn keys(&self) -> StorageResult<Vec<String>> {
        self.backend.keys()
    }

    /// Every stored key with its raw string value.
    pub fn entries(&self) -> StorageResult<Document> {
        self.backend.entries()
    }
}

impl Default for Storage {
    /// A file backend at the default location.
    fn default() -> Self {
        Self::new(Arc::new(FileBackend::new()))
    }
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("location", &self.location())
            .finish()
    }
}
