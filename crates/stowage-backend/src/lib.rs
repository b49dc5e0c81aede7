//! Storage backends for Stowage.
//!
//! A backend persists one document, a flat map of string keys to string
//! values, at a configurable (directory, file name) location. Typed values are
//! converted to canonical strings on the way in and coerced back to the
//! caller's requested kind on the way out.
//!
//! # Storage Backends
//!
//! All backends implement the [`Backend`] trait:
//!
//! - [`FileBackend`] -- one JSON file per location, full read-modify-write
//! - [`InMemoryBackend`] -- `BTreeMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Absence is normal: missing keys and missing files load as the default
//!    and delete as a no-op.
//! 2. An unreadable file is an error, never an empty document. Saving over
//!    it would destroy whatever it holds.
//! 3. A stored string that does not parse as the requested kind is a
//!    [`StorageError::TypeMismatch`], never a truncated value.
//! 4. All I/O errors are propagated, never retried.

pub mod codec;
pub mod error;
pub mod file;
pub mod location;
pub mod memory;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use codec::{CodecError, Document};
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use location::{Location, WriteStrategy, DEFAULT_FILE_NAME};
pub use memory::InMemoryBackend;
pub use traits::Backend;
