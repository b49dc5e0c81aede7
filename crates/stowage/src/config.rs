use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use stowage_backend::{
    Backend, FileBackend, InMemoryBackend, Location, WriteStrategy, DEFAULT_FILE_NAME,
};

use crate::error::{ConfigError, ConfigResult};

/// Which backend a [`StorageConfig`] builds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    File,
    Memory,
}

/// Host-level storage configuration.
///
/// Every field has a default, so an empty TOML document is valid:
///
/// ```toml
/// backend = "file"
/// path = "/var/lib/game"
/// file_name = "prefs.json"
/// write_strategy = "atomic"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: BackendKind,
    pub path: PathBuf,
    pub file_name: String,
    pub write_strategy: WriteStrategy,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::File,
            path: PathBuf::new(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            write_strategy: WriteStrategy::Direct,
        }
    }
}

impl StorageConfig {
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read a TOML config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn location(&self) -> Location {
        Location::new(&self.path, &self.file_name)
    }

    /// Construct the configured backend.
    pub fn build_backend(&self) -> Arc<dyn Backend> {
        match self.backend {
            BackendKind::File => Arc::new(
                FileBackend::with_location(self.location())
                    .with_write_strategy(self.write_strategy),
            ),
            BackendKind::Memory => {
                let backend = InMemoryBackend::new();
                backend.set_path(&self.path);
                backend.set_file_name(&self.file_name);
                Arc::new(backend)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = StorageConfig::default();
        assert_eq!(c.backend, BackendKind::File);
        assert_eq!(c.path, PathBuf::new());
        assert_eq!(c.file_name, "player-prefs.json");
        assert_eq!(c.write_strategy, WriteStrategy::Direct);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(
            StorageConfig::from_toml_str("").unwrap(),
            StorageConfig::default()
        );
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c = StorageConfig::from_toml_str(
            r#"
            path = "/tmp/x"
            write_strategy = "atomic"
            "#,
        )
        .unwrap();
        assert_eq!(c.path, PathBuf::from("/tmp/x"));
        assert_eq!(c.file_name, "player-prefs.json");
        assert_eq!(c.write_strategy, WriteStrategy::Atomic);
        assert_eq!(c.location().resolve(), PathBuf::from("/tmp/x/player-prefs.json"));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let err = StorageConfig::from_toml_str(r#"backend = "registry""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn toml_text_reparses() {
        let c = StorageConfig {
            backend: BackendKind::Memory,
            path: "data".into(),
            file_name: "p.json".into(),
            write_strategy: WriteStrategy::Atomic,
        };
        let text = c.to_toml_string().unwrap();
        assert_eq!(StorageConfig::from_toml_str(&text).unwrap(), c);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StorageConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn build_memory_backend_keeps_location() {
        let c = StorageConfig {
            backend: BackendKind::Memory,
            path: "somewhere".into(),
            file_name: "p.json".into(),
            ..StorageConfig::default()
        };
        let backend = c.build_backend();
        assert_eq!(backend.location(), PathBuf::from("somewhere/p.json"));
    }
}
