use thiserror::Error;

use crate::value::ValueKind;

/// Errors produced when converting between stored strings and typed values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A stored string cannot be parsed as the requested kind.
    #[error("cannot read {raw:?} as {expected}")]
    Unparseable { expected: ValueKind, raw: String },

    /// A value of one kind was requested as another.
    #[error("expected a {expected} value, got {actual}")]
    WrongKind {
        expected: ValueKind,
        actual: ValueKind,
    },

    /// A number does not fit in the requested width.
    #[error("{value} is out of range for {target}")]
    OutOfRange { value: String, target: &'static str },

    /// An unknown kind name was given.
    #[error("unknown value kind: {0}")]
    UnknownKind(String),
}
