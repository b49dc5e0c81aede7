use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// File name used when none is configured.
pub const DEFAULT_FILE_NAME: &str = "player-prefs.json";

/// Where a backend keeps its document: a directory plus a file name.
///
/// Nothing is validated or created when a location is configured; problems
/// surface on the next read or write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub path: PathBuf,
    pub file_name: String,
}

impl Location {
    pub fn new(path: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            file_name: file_name.into(),
        }
    }

    /// The full file path. An empty directory yields the bare file name.
    pub fn resolve(&self) -> PathBuf {
        self.path.join(&self.file_name)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

/// How a file backend replaces the document on disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteStrategy {
    /// Truncate and write the file in place. A crash mid-write can leave a
    /// partial document.
    #[default]
    Direct,
    /// Write a temporary file in the same directory, then rename it over the
    /// target. A replaced file keeps its permissions; a newly created one is
    /// owner-only (0600 on Unix) rather than following the umask.
    Atomic,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_location() {
        let loc = Location::default();
        assert_eq!(loc.path, PathBuf::new());
        assert_eq!(loc.file_name, "player-prefs.json");
        assert_eq!(loc.resolve(), PathBuf::from("player-prefs.json"));
    }

    #[test]
    fn resolve_joins_directory() {
        let loc = Location::new("/tmp/x", "p.json");
        assert_eq!(loc.resolve(), PathBuf::from("/tmp/x/p.json"));
    }

    #[test]
    fn write_strategy_defaults_to_direct() {
        assert_eq!(WriteStrategy::default(), WriteStrategy::Direct);
    }
}
