//! Type-keyed instance registry for Stowage.
//!
//! Startup code binds one instance per type (typically an
//! `Arc<dyn Backend>`), and components resolve it later. A registry is an
//! ordinary value owned by the application; there is no global instance, so
//! tests build their own.
//!
//! # Modules
//!
//! - [`error`] — [`RegistryError`] for `?`-style resolution
//! - [`registry`] — The [`Registry`] itself

pub mod error;
pub mod registry;

pub use error::{RegistryError, Result};
pub use registry::Registry;
