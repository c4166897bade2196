//! Local-variable values attached to script frames.
//!
//! Script runtimes hold arbitrary dynamically typed objects. Rather than keep
//! a reference into a host object model, the introspection layer converts
//! each local into a [`LocalValue`]; values it cannot express structurally
//! become [`LocalValue::Opaque`] with the object's textual representation.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Local variables of a script frame, keyed by name in insertion order.
pub type Locals = IndexMap<String, LocalValue>;

/// A snapshot of one local variable's value.
///
/// Serialized untagged, so the JSON form is the natural one: `null`, `true`,
/// `42`, `1.5`, `"text"`, `[...]`, `{...}`. Opaque values use the reserved
/// keys `$type` and `$repr`.
///
/// Integers above `i64::MAX` are kept as [`LocalValue::UInt`]. JSON has no
/// representation for NaN or infinite floats: such a `Float` serializes as
/// `null` and reads back as [`LocalValue::None`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalValue {
    None,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    List(Vec<LocalValue>),
    Opaque(OpaqueValue),
    Map(IndexMap<String, LocalValue>),
}

/// A host object that only has a textual representation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpaqueValue {
    /// Runtime type name of the object (e.g. `socket`).
    #[serde(rename = "$type")]
    pub type_name: String,
    /// Textual representation as produced by the runtime.
    #[serde(rename = "$repr")]
    pub repr: String,
}

impl LocalValue {
    /// Create an opaque value from a type name and representation.
    pub fn opaque(type_name: impl Into<String>, repr: impl Into<String>) -> Self {
        Self::Opaque(OpaqueValue {
            type_name: type_name.into(),
            repr: repr.into(),
        })
    }

    /// Short name of the variant, used when rendering locals.
    pub fn type_name(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "bool",
            Self::Int(_) | Self::UInt(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "str",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Opaque(o) => &o.type_name,
        }
    }

    /// Returns `true` for [`LocalValue::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for LocalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::String(s) => write!(f, "'{}'", s.escape_default()),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{}': {value}", key.escape_default())?;
                }
                write!(f, "}}")
            }
            Self::Opaque(o) => write!(f, "{}", o.repr),
        }
    }
}

impl From<bool> for LocalValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for LocalValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for LocalValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u64> for LocalValue {
    fn from(u: u64) -> Self {
        i64::try_from(u).map_or(Self::UInt(u), Self::Int)
    }
}

impl From<f64> for LocalValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for LocalValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for LocalValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<LocalValue>> for LocalValue {
    fn from(items: Vec<LocalValue>) -> Self {
        Self::List(items)
    }
}

impl<T: Into<LocalValue>> From<Option<T>> for LocalValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}
