use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// The closed set of scalar kinds a store can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Text,
    Integer,
    Float,
}

impl ValueKind {
    /// Parse a stored string as a value of this kind.
    ///
    /// Text accepts any string. Integers must parse as `i64` and floats as
    /// `f64`; anything else is [`ValueError::Unparseable`].
    pub fn parse(self, raw: &str) -> Result<Value, ValueError> {
        let unparseable = || ValueError::Unparseable {
            expected: self,
            raw: raw.to_string(),
        };
        match self {
            Self::Text => Ok(Value::Text(raw.to_string())),
            Self::Integer => raw
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| unparseable()),
            Self::Float => raw
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| unparseable()),
        }
    }

    /// Lowercase name used in messages and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueKind {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "string" | "str" => Ok(Self::Text),
            "integer" | "int" => Ok(Self::Integer),
            "float" | "number" => Ok(Self::Float),
            other => Err(ValueError::UnknownKind(other.to_string())),
        }
    }
}

/// A typed scalar as seen by callers of a store.
///
/// Every value is persisted as its canonical string (see
/// [`Value::to_canonical`]); the kind is recovered at load time from the
/// caller's default.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
        }
    }

    /// The canonical string form written to a document.
    ///
    /// Floats use the shortest representation that parses back to the same
    /// `f64`, so the conversion is lossless.
    pub fn to_canonical(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
        }
    }

    /// Coerce this value into another kind via its canonical string.
    pub fn coerce(&self, kind: ValueKind) -> Result<Value, ValueError> {
        if self.kind() == kind {
            return Ok(self.clone());
        }
        kind.parse(&self.to_canonical())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

/// Widened through the shortest `f32` string, so `0.1f32` is stored as
/// `"0.1"` rather than `"0.10000000149011612"`.
impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Self::Float(f.to_string().parse().unwrap_or_else(|_| f64::from(f)))
    }
}

/// A Rust type that can be stored and loaded as a [`Value`].
///
/// The default passed to a typed load selects the kind to coerce to, and
/// `Owned` is what the load returns (`&str` defaults load as `String`).
pub trait Scalar: Into<Value> {
    /// The type returned from a load with a default of this type.
    type Owned;

    /// Extract the typed value from a value already coerced to the
    /// default's kind.
    fn from_value(value: Value) -> Result<Self::Owned, ValueError>;
}

fn wrong_kind(expected: ValueKind, value: &Value) -> ValueError {
    ValueError::WrongKind {
        expected,
        actual: value.kind(),
    }
}

impl Scalar for String {
    type Owned = String;

    fn from_value(value: Value) -> Result<String, ValueError> {
        match value {
            Value::Text(s) => Ok(s),
            other => Err(wrong_kind(ValueKind::Text, &other)),
        }
    }
}

impl Scalar for &str {
    type Owned = String;

    fn from_value(value: Value) -> Result<String, ValueError> {
        String::from_value(value)
    }
}

impl Scalar for i64 {
    type Owned = i64;

    fn from_value(value: Value) -> Result<i64, ValueError> {
        value
            .as_integer()
            .ok_or_else(|| wrong_kind(ValueKind::Integer, &value))
    }
}

impl Scalar for i32 {
    type Owned = i32;

    fn from_value(value: Value) -> Result<i32, ValueError> {
        let wide = i64::from_value(value)?;
        i32::try_from(wide).map_err(|_| ValueError::OutOfRange {
            value: wide.to_string(),
            target: "i32",
        })
    }
}

impl Scalar for f64 {
    type Owned = f64;

    fn from_value(value: Value) -> Result<f64, ValueError> {
        value
            .as_float()
            .ok_or_else(|| wrong_kind(ValueKind::Float, &value))
    }
}

impl Scalar for f32 {
    type Owned = f32;

    fn from_value(value: Value) -> Result<f32, ValueError> {
        let wide = f64::from_value(value)?;
        let narrow = wide as f32;
        if wide.is_finite() && narrow.is_infinite() {
            return Err(ValueError::OutOfRange {
                value: wide.to_string(),
                target: "f32",
            });
        }
        Ok(narrow)
    }
}

impl Scalar for Value {
    type Owned = Value;

    fn from_value(value: Value) -> Result<Value, ValueError> {
        Ok(value)
    }
}
