//! Error types for registry lookups.

use thiserror::Error;

/// Errors that can occur when resolving from a [`Registry`](crate::Registry).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Nothing is bound for the requested type.
    #[error("no binding found for type {type_name}")]
    NotBound { type_name: &'static str },
}

/// Convenience type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
