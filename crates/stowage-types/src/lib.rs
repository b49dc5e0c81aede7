//! Scalar value types for Stowage.
//!
//! A store holds string keys mapped to string values. Callers work with a
//! small closed set of typed scalars instead, and this crate owns the
//! conversion between the two.
//!
//! # Key Types
//!
//! - [`Value`] — Tagged union of text, integer, and float
//! - [`ValueKind`] — The discriminant, used to request a kind at load time
//! - [`Scalar`] — Rust types usable as typed defaults (`String`, `&str`, `i64`, `i32`, `f64`, `f32`)
//! - [`ValueError`] — Coercion failures

pub mod error;
pub mod value;

pub use error::ValueError;
pub use value::{Scalar, Value, ValueKind};
