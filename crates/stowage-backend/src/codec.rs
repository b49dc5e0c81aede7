//! JSON codec for whole documents.
//!
//! On-disk format is a single flat JSON object, keys sorted, every value a
//! string:
//!
//! ```text
//! {
//!   "name": "Bob",
//!   "score": "42"
//! }
//! ```

use std::collections::BTreeMap;

/// The full key → string mapping persisted at one location.
///
/// A `BTreeMap` keeps encoding deterministic.
pub type Document = BTreeMap<String, String>;

/// Errors from encoding or decoding a document.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The bytes are not a JSON object of string values.
    #[error("{0}")]
    Malformed(serde_json::Error),

    #[error("{0}")]
    Encode(serde_json::Error),
}

/// Encode a document as pretty-printed UTF-8 JSON with a trailing newline.
pub fn encode(document: &Document) -> Result<Vec<u8>, CodecError> {
    let mut bytes = serde_json::to_vec_pretty(document).map_err(CodecError::Encode)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decode a document.
///
/// The bytes must be a JSON object whose values are all strings. A
/// zero-length input is not JSON and is rejected like any other garbage.
pub fn decode(bytes: &[u8]) -> Result<Document, CodecError> {
    serde_json::from_slice(bytes).map_err(CodecError::Malformed)
}
