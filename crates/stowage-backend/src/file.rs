//! File-backed storage: one JSON document per location.
//!
//! Every operation reads the whole file, and `save`/`delete` rewrite the
//! whole file. That is O(document size) per call, fine for preference-sized
//! stores and not meant for large key counts or high write rates.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use stowage_types::Value;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::codec::{self, CodecError, Document};
use crate::error::{StorageError, StorageResult};
use crate::location::{Location, WriteStrategy};
use crate::traits::Backend;

/// The default [`Backend`]: a single file holding one document.
///
/// No document is cached between calls. The location can be changed at any
/// time through `&self`; each operation snapshots it once so a read and the
/// write that follows always hit the same file.
#[derive(Debug)]
pub struct FileBackend {
    location: RwLock<Location>,
    strategy: WriteStrategy,
}

impl FileBackend {
    /// A backend at the default location (`player-prefs.json` in the working
    /// directory) using direct writes.
    pub fn new() -> Self {
        Self::with_location(Location::default())
    }

    pub fn with_location(location: Location) -> Self {
        Self {
            location: RwLock::new(location),
            strategy: WriteStrategy::default(),
        }
    }

    /// Builder-style write strategy override.
    pub fn with_write_strategy(mut self, strategy: WriteStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn write_strategy(&self) -> WriteStrategy {
        self.strategy
    }

    /// Snapshot of the configured location.
    pub fn current_location(&self) -> Location {
        self.location
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Read and decode the document, or `None` if the file does not exist.
    fn read_document(&self, target: &Path) -> StorageResult<Option<Document>> {
        let bytes = match fs::read(target) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::io(target, e)),
        };
        match codec::decode(&bytes) {
            Ok(document) => Ok(Some(document)),
            Err(e) => {
                warn!(location = %target.display(), error = %e, "refusing to use malformed document");
                Err(StorageError::MalformedDocument {
                    location: target.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        }
    }

    fn write_document(&self, target: &Path, document: &Document) -> StorageResult<()> {
        let bytes = codec::encode(document).map_err(|e| match e {
            CodecError::Encode(e) | CodecError::Malformed(e) => {
                StorageError::Encode(e.to_string())
            }
        })?;

        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
                parent.to_path_buf()
            }
            _ => PathBuf::from("."),
        };

        match self.strategy {
            WriteStrategy::Direct => {
                fs::write(target, &bytes).map_err(|e| StorageError::io(target, e))
            }
            WriteStrategy::Atomic => {
                let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| StorageError::io(&dir, e))?;
                tmp.write_all(&bytes)
                    .and_then(|()| tmp.as_file().sync_all())
                    .map_err(|e| StorageError::io(tmp.path(), e))?;
                // The temp file starts out owner-only; keep the mode of the
                // file being replaced.
                if let Ok(existing) = fs::metadata(target) {
                    tmp.as_file()
                        .set_permissions(existing.permissions())
                        .map_err(|e| StorageError::io(tmp.path(), e))?;
                }
                tmp.persist(target)
                    .map_err(|e| StorageError::io(target, e.error))?;
                Ok(())
            }
        }
    }
}

impl Default for FileBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for FileBackend {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let target = self.location();
        Ok(self
            .read_document(&target)?
            .and_then(|mut document| document.remove(key)))
    }

    fn save(&self, key: &str, value: &Value) -> StorageResult<()> {
        let target = self.location();
        let mut document = self.read_document(&target)?.unwrap_or_default();
        document.insert(key.to_string(), value.to_canonical());
        self.write_document(&target, &document)?;
        debug!(key, kind = %value.kind(), location = %target.display(), "saved");
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        let target = self.location();
        let Some(mut document) = self.read_document(&target)? else {
            return Ok(false);
        };
        if document.remove(key).is_none() {
            return Ok(false);
        }
        self.write_document(&target, &document)?;
        debug!(key, location = %target.display(), "deleted");
        Ok(true)
    }

    fn entries(&self) -> StorageResult<Document> {
        let target = self.location();
        Ok(self.read_document(&target)?.unwrap_or_default())
    }

    fn path(&self) -> PathBuf {
        self.current_location().path
    }

    fn set_path(&self, path: &Path) {
        self.location
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .path = path.to_path_buf();
    }

    fn file_name(&self) -> String {
        self.current_location().file_name
    }

    fn set_file_name(&self, file_name: &str) {
        self.location
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .file_name = file_name.to_string();
    }

    fn location(&self) -> PathBuf {
        self.current_location().resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_backend() -> (tempfile::TempDir, FileBackend) {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::with_location(Location::new(dir.path(), "prefs.json"));
        (dir, backend)
    }

    #[test]
    fn load_without_file_returns_default() {
        let (dir, backend) = temp_backend();
        let value = backend.load("missing", Value::from(7)).unwrap();
        assert_eq!(value, Value::Integer(7));
        assert!(!dir.path().join("prefs.json").exists());
    }

    #[test]
    fn load_missing_key_returns_default() {
        let (_dir, backend) = temp_backend();
        backend.save("present", &Value::from("x")).unwrap();
        let value = backend.load("absent", Value::from("fallback")).unwrap();
        assert_eq!(value, Value::from("fallback"));
    }

    #[test]
    fn save_and_load_each_kind() {
        let (_dir, backend) = temp_backend();
        backend.save("name", &Value::from("Ann")).unwrap();
        backend.save("score", &Value::from(42)).unwrap();
        backend.save("ratio", &Value::from(0.1)).unwrap();

        assert_eq!(
            backend.load("name", Value::from("")).unwrap(),
            Value::from("Ann")
        );
        assert_eq!(
            backend.load("score", Value::from(0)).unwrap(),
            Value::Integer(42)
        );
        assert_eq!(
            backend.load("ratio", Value::from(0.0)).unwrap(),
            Value::Float(0.1)
        );
    }

    #[test]
    fn overwrite_keeps_latest() {
        let (_dir, backend) = temp_backend();
        backend.save("name", &Value::from("Ann")).unwrap();
        backend.save("name", &Value::from("Bob")).unwrap();
        assert_eq!(
            backend.load("name", Value::from("")).unwrap(),
            Value::from("Bob")
        );
        assert_eq!(backend.keys().unwrap(), vec!["name".to_string()]);
    }

    #[test]
    fn file_contents_are_string_map() {
        let (dir, backend) = temp_backend();
        backend.save("score", &Value::from(42)).unwrap();
        let text = fs::read_to_string(dir.path().join("prefs.json")).unwrap();
        assert_eq!(text, "{\n  \"score\": \"42\"\n}\n");
    }

    #[test]
    fn delete_removes_key() {
        let (_dir, backend) = temp_backend();
        backend.save("a", &Value::from("1")).unwrap();
        backend.save("b", &Value::from("2")).unwrap();
        assert!(backend.delete("a").unwrap());
        assert_eq!(backend.read("a").unwrap(), None);
        assert_eq!(backend.read("b").unwrap(), Some("2".to_string()));
    }

    #[test]
    fn delete_without_file_is_noop() {
        let (dir, backend) = temp_backend();
        assert!(!backend.delete("missing").unwrap());
        assert!(!backend.delete("missing").unwrap());
        assert!(!dir.path().join("prefs.json").exists());
    }

    #[test]
    fn delete_absent_key_does_not_rewrite() {
        let (dir, backend) = temp_backend();
        let target = dir.path().join("prefs.json");
        fs::write(&target, br#"{"keep":"me"}"#).unwrap();
        assert!(!backend.delete("other").unwrap());
        assert_eq!(fs::read(&target).unwrap(), br#"{"keep":"me"}"#);
    }

    #[test]
    fn delete_twice_same_state() {
        let (_dir, backend) = temp_backend();
        backend.save("a", &Value::from(1)).unwrap();
        assert!(backend.delete("a").unwrap());
        assert!(!backend.delete("a").unwrap());
        assert!(backend.keys().unwrap().is_empty());
    }

    #[test]
    fn malformed_file_fails_load() {
        let (dir, backend) = temp_backend();
        fs::write(dir.path().join("prefs.json"), b"{ not json").unwrap();
        let err = backend.load("k", Value::from("d")).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn malformed_file_fails_save_without_clobbering() {
        let (dir, backend) = temp_backend();
        let target = dir.path().join("prefs.json");
        fs::write(&target, b"\x00\x01garbage").unwrap();

        let err = backend.save("k", &Value::from("v")).unwrap_err();
        assert!(err.is_malformed());
        assert_eq!(fs::read(&target).unwrap(), b"\x00\x01garbage");

        let err = backend.delete("k").unwrap_err();
        assert!(err.is_malformed());
        assert_eq!(fs::read(&target).unwrap(), b"\x00\x01garbage");
    }

    #[test]
    fn type_mismatch_is_an_error() {
        let (_dir, backend) = temp_backend();
        backend.save("greeting", &Value::from("hello")).unwrap();
        let err = backend.load("greeting", Value::from(0)).unwrap_err();
        assert!(err.is_type_mismatch());
    }

    #[test]
    fn empty_file_is_malformed() {
        let (dir, backend) = temp_backend();
        let target = dir.path().join("prefs.json");
        fs::write(&target, b"").unwrap();

        assert!(backend.load("k", Value::from("d")).unwrap_err().is_malformed());
        assert!(backend.save("k", &Value::from("v")).unwrap_err().is_malformed());
        assert!(fs::read(&target).unwrap().is_empty());
    }

    #[test]
    fn path_through_regular_file_is_io_error() {
        let (dir, backend) = temp_backend();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();
        backend.set_path(&blocker);

        match backend.save("k", &Value::from("v")).unwrap_err() {
            StorageError::Io { location, .. } => assert_eq!(location, blocker.join("prefs.json")),
            other => panic!("expected Io, got {other:?}"),
        }
        assert_eq!(fs::read(&blocker).unwrap(), b"not a directory");
    }

    #[test]
    fn directory_at_location_is_io_error() {
        let (dir, backend) = temp_backend();
        let target = dir.path().join("prefs.json");
        fs::create_dir(&target).unwrap();

        match backend.load("k", Value::from("d")).unwrap_err() {
            StorageError::Io { location, .. } => assert_eq!(location, target),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let backend = FileBackend::with_location(Location::new(&nested, "p.json"));
        backend.save("score", &Value::from(42)).unwrap();
        assert!(nested.join("p.json").exists());
    }

    #[test]
    fn configuration_applies_to_next_call() {
        let (dir, backend) = temp_backend();
        backend.save("k", &Value::from("first")).unwrap();

        backend.set_file_name("other.json");
        assert_eq!(backend.file_name(), "other.json");
        assert!(!dir.path().join("other.json").exists());
        assert_eq!(backend.read("k").unwrap(), None);

        backend.set_file_name("prefs.json");
        assert_eq!(backend.read("k").unwrap(), Some("first".to_string()));
    }

    #[test]
    fn set_path_moves_location() {
        let (_dir, backend) = temp_backend();
        let other = tempfile::tempdir().unwrap();
        backend.set_path(other.path());
        assert_eq!(backend.path(), other.path());
        assert_eq!(backend.location(), other.path().join("prefs.json"));
    }

    #[test]
    fn atomic_strategy_writes_same_document() {
        let dir = tempfile::tempdir().unwrap();
        let direct = FileBackend::with_location(Location::new(dir.path(), "direct.json"));
        let atomic = FileBackend::with_location(Location::new(dir.path(), "atomic.json"))
            .with_write_strategy(WriteStrategy::Atomic);
        assert_eq!(atomic.write_strategy(), WriteStrategy::Atomic);

        for backend in [&direct, &atomic] {
            backend.save("a", &Value::from(1)).unwrap();
            backend.save("b", &Value::from("two")).unwrap();
            backend.delete("a").unwrap();
        }

        assert_eq!(
            fs::read(dir.path().join("direct.json")).unwrap(),
            fs::read(dir.path().join("atomic.json")).unwrap()
        );
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 2);
    }

    #[cfg(unix)]
    #[test]
    fn atomic_strategy_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("prefs.json");
        fs::write(&target, b"{}").unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o644)).unwrap();

        let backend = FileBackend::with_location(Location::new(dir.path(), "prefs.json"))
            .with_write_strategy(WriteStrategy::Atomic);
        backend.save("k", &Value::from("v")).unwrap();

        let mode = fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
        assert_eq!(backend.read("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn keys_are_sorted() {
        let (_dir, backend) = temp_backend();
        for key in ["zeta", "alpha", "mid"] {
            backend.save(key, &Value::from(key)).unwrap();
        }
        assert_eq!(backend.keys().unwrap(), vec!["alpha", "mid", "zeta"]);
    }
}
