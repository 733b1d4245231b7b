//! The value tree.
//!
//! A [`Value`] is both what the parser produces from a YAML document and what
//! the evaluator returns. Navigation (`hash_get`, `array_get`) hands out owned
//! copies: a child obtained from a tree never aliases it, so either can be
//! dropped without affecting the other.

use std::fmt;

use indexmap::IndexMap;

use crate::errors::{index_out_of_bounds, key_not_found, wrong_type, YamlResult};
use crate::Tag;

/// Hash payload. Iteration follows document insertion order.
pub type Hash = IndexMap<String, Value>;

/// A node of the value tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Integer(i64),
    Real(f64),
    String(String),
    Boolean(bool),
    Array(Vec<Value>),
    Hash(Hash),
    Null,
}

impl Value {
    /// Create a string value.
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Type tag of this node. Never fails.
    pub const fn tag(&self) -> Tag {
        match self {
            Value::Integer(_) => Tag::Integer,
            Value::Real(_) => Tag::Real,
            Value::String(_) => Tag::String,
            Value::Boolean(_) => Tag::Boolean,
            Value::Array(_) => Tag::Array,
            Value::Hash(_) => Tag::Hash,
            Value::Null => Tag::Null,
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    // Scalar accessors. No numeric coercion: an Integer is not a Real.

    pub fn as_integer(&self) -> YamlResult<i64> {
        match self {
            Value::Integer(i) => Ok(*i),
            other => Err(wrong_type("integer", other.tag())),
        }
    }

    pub fn as_real(&self) -> YamlResult<f64> {
        match self {
            Value::Real(r) => Ok(*r),
            other => Err(wrong_type("real", other.tag())),
        }
    }

    pub fn as_str(&self) -> YamlResult<&str> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(wrong_type("string", other.tag())),
        }
    }

    pub fn as_bool(&self) -> YamlResult<bool> {
        match self {
            Value::Boolean(b) => Ok(*b),
            other => Err(wrong_type("boolean", other.tag())),
        }
    }

    pub fn as_array(&self) -> YamlResult<&[Value]> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(wrong_type("array", other.tag())),
        }
    }

    pub fn as_hash(&self) -> YamlResult<&Hash> {
        match self {
            Value::Hash(hash) => Ok(hash),
            other => Err(wrong_type("hash", other.tag())),
        }
    }

    // Navigation

    pub fn array_len(&self) -> YamlResult<usize> {
        self.as_array().map(<[Value]>::len)
    }

    /// Borrow the element at `index`.
    pub fn array_entry(&self, index: usize) -> YamlResult<&Value> {
        let items = self.as_array()?;
        items.get(index).ok_or_else(|| {
            index_out_of_bounds(i64::try_from(index).unwrap_or(i64::MAX), items.len())
        })
    }

    /// Copy out the element at `index`.
    pub fn array_get(&self, index: usize) -> YamlResult<Value> {
        self.array_entry(index).cloned()
    }

    /// Keys in document order.
    pub fn hash_keys(&self) -> YamlResult<Vec<&str>> {
        Ok(self.as_hash()?.keys().map(String::as_str).collect())
    }

    /// Borrow the value stored under `key`.
    pub fn hash_entry(&self, key: &str) -> YamlResult<&Value> {
        self.as_hash()?.get(key).ok_or_else(|| key_not_found(key))
    }

    /// Copy out the value stored under `key`.
    pub fn hash_get(&self, key: &str) -> YamlResult<Value> {
        self.hash_entry(key).cloned()
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(r: f64) -> Self {
        Value::Real(r)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Hash> for Value {
    fn from(hash: Hash) -> Self {
        Value::Hash(hash)
    }
}

/// Compact flow-style rendering, used in logs and error messages.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            // Keep a fractional part so reals never read as integers
            Value::Real(r) if r.is_finite() && r.fract() == 0.0 => write!(f, "{r:.1}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Hash(hash) => {
                f.write_str("{")?;
                for (i, (key, value)) in hash.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Value::Null => f.write_str("null"),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
