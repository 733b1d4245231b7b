//! Typed variable store.
//!
//! One flat namespace, at most one binding per name. Setting a name replaces
//! whatever was bound there, whatever its type. Getters never coerce: a name
//! bound to a Real is not readable as an Integer.

use rustc_hash::FxHashMap;
use yamlate_ir::errors::{binding_type, undefined_variable, wrong_type};
use yamlate_ir::{Error, Tag, Value, YamlResult};

/// A value that can be stored in an [`Environment`].
#[derive(Clone, Debug, PartialEq)]
pub enum Binding {
    Integer(i64),
    Real(f64),
    String(String),
}

impl Binding {
    pub const fn tag(&self) -> Tag {
        match self {
            Binding::Integer(_) => Tag::Integer,
            Binding::Real(_) => Tag::Real,
            Binding::String(_) => Tag::String,
        }
    }

    pub fn to_value(&self) -> Value {
        self.clone().into()
    }
}

impl From<Binding> for Value {
    fn from(binding: Binding) -> Self {
        match binding {
            Binding::Integer(i) => Value::Integer(i),
            Binding::Real(r) => Value::Real(r),
            Binding::String(s) => Value::String(s),
        }
    }
}

/// Only Integer, Real and String values can be bound.
impl TryFrom<Value> for Binding {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Integer(i) => Ok(Binding::Integer(i)),
            Value::Real(r) => Ok(Binding::Real(r)),
            Value::String(s) => Ok(Binding::String(s)),
            other => Err(wrong_type("integer, real or string", other.tag())),
        }
    }
}

/// Variable store consulted, and possibly mutated, during evaluation.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    bindings: FxHashMap<String, Binding>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    /// Bind `name`, returning the binding it replaced.
    pub fn set(&mut self, name: impl Into<String>, binding: Binding) -> Option<Binding> {
        let name = name.into();
        tracing::debug!(%name, ?binding, "bind");
        self.bindings.insert(name, binding)
    }

    pub fn set_integer(&mut self, name: impl Into<String>, value: i64) {
        self.set(name, Binding::Integer(value));
    }

    pub fn set_decimal(&mut self, name: impl Into<String>, value: f64) {
        self.set(name, Binding::Real(value));
    }

    pub fn set_string(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.set(name, Binding::String(value.into()));
    }

    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// The binding for `name`, or `NotDefined`.
    pub fn get(&self, name: &str) -> YamlResult<&Binding> {
        self.lookup(name).ok_or_else(|| undefined_variable(name))
    }

    pub fn get_integer(&self, name: &str) -> YamlResult<i64> {
        match self.get(name)? {
            Binding::Integer(i) => Ok(*i),
            other => Err(binding_type(name, Tag::Integer, other.tag())),
        }
    }

    pub fn get_decimal(&self, name: &str) -> YamlResult<f64> {
        match self.get(name)? {
            Binding::Real(r) => Ok(*r),
            other => Err(binding_type(name, Tag::Real, other.tag())),
        }
    }

    pub fn get_string(&self, name: &str) -> YamlResult<&str> {
        match self.get(name)? {
            Binding::String(s) => Ok(s),
            other => Err(binding_type(name, Tag::String, other.tag())),
        }
    }

    /// The bound value as a [`Value`], typed by the binding.
    pub fn value(&self, name: &str) -> YamlResult<Value> {
        self.get(name).map(Binding::to_value)
    }

    /// Remove `name`, returning its binding if there was one.
    pub fn unset(&mut self, name: &str) -> Option<Binding> {
        let removed = self.bindings.remove(name);
        if removed.is_some() {
            tracing::debug!(name, "unbind");
        }
        removed
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bound names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
