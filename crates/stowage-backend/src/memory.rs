//! In-memory backend for tests, embedding, and hosts without a writable
//! file system.
//!
//! [`InMemoryBackend`] keeps its document in a `BTreeMap` behind a `RwLock`.
//! The configured location is recorded but never touched, and data is lost
//! when the backend is dropped.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use stowage_types::Value;

use crate::codec::Document;
use crate::error::{StorageError, StorageResult};
use crate::location::Location;
use crate::traits::Backend;

/// An in-memory implementation of [`Backend`].
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    document: RwLock<Document>,
    location: RwLock<Location>,
}

impl InMemoryBackend {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-populated with raw stored strings.
    pub fn from_document(document: Document) -> Self {
        Self {
            document: RwLock::new(document),
            location: RwLock::default(),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.document
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Backend for InMemoryBackend {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let document = self.document.read().map_err(|_| StorageError::Poisoned)?;
        Ok(document.get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> StorageResult<()> {
        let mut document = self.document.write().map_err(|_| StorageError::Poisoned)?;
        document.insert(key.to_string(), value.to_canonical());
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        let mut document = self.document.write().map_err(|_| StorageError::Poisoned)?;
        Ok(document.remove(key).is_some())
    }

    fn entries(&self) -> StorageResult<Document> {
        let document = self.document.read().map_err(|_| StorageError::Poisoned)?;
        Ok(document.clone())
    }

    fn path(&self) -> PathBuf {
        self.location
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .path
            .clone()
    }

    fn set_path(&self, path: &Path) {
        self.location
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .path = path.to_path_buf();
    }

    fn file_name(&self) -> String {
        self.location
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .file_name
            .clone()
    }

    fn set_file_name(&self, file_name: &str) {
        self.location
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .file_name = file_name.to_string();
    }
}
