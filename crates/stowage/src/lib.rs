//! Typed key-value persistence with swappable backends.
//!
//! [`Storage`] is the entry point. It forwards every call to one active
//! [`Backend`], chosen by the host at startup: built from a
//! [`StorageConfig`], passed in directly, or resolved from a [`Registry`].
//!
//! ```no_run
//! use stowage::Storage;
//!
//! # fn main() -> stowage::StorageResult<()> {
//! let storage = Storage::default();
//! storage.set_path("/tmp/x");
//! storage.set_file_name("p.json");
//! storage.save("score", 42)?;
//! assert_eq!(storage.load("score", 0_i32)?, 42);
//! # Ok(()) }
//! ```
//!
//! Values are text, integers, or floats. The default passed to
//! [`Storage::load`] decides which kind is read back.

pub mod config;
pub mod error;
pub mod storage;

pub use config::{BackendKind, StorageConfig};
pub use error::{ConfigError, ConfigResult, StorageError, StorageResult};
pub use storage::Storage;

// Re-export key types
pub use stowage_backend::{
    Backend, Document, FileBackend, InMemoryBackend, Location, WriteStrategy, DEFAULT_FILE_NAME,
};
pub use stowage_registry::Registry;
pub use stowage_types::{Scalar, Value, ValueError, ValueKind};
