//! Handle-based boundary surface.
//!
//! A [`Session`] owns every Value and Environment handed across the
//! boundary. Each one is addressed by a generational handle and stays alive
//! until its `*_destroy` call. Results returned by navigation and
//! evaluation are fresh, independently owned values: destroying one handle
//! never invalidates another.
//!
//! Every fallible operation reports an [`ErrorCode`]. Using a destroyed or
//! never-issued handle is `NotDefined`.

use std::cell::OnceCell;
use std::ffi::{CStr, CString};

use yamlate_eval::{Environment, Evaluator};
use yamlate_ir::errors::{index_out_of_bounds, interior_nul, stale_handle};
use yamlate_ir::{Error, ErrorCode, Tag, Value};

use crate::handle::{Handle, HandleTable};

pub type ValueHandle = Handle<ValueSlot>;
pub type EnvHandle = Handle<Environment>;

/// A value owned by the session.
pub struct ValueSlot {
    value: Value,
    /// NUL-terminated copy of a String payload, built on first request.
    c_string: OnceCell<CString>,
}

impl ValueSlot {
    fn new(value: Value) -> Self {
        ValueSlot {
            value,
            c_string: OnceCell::new(),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// A boundary result in the `{ value, error }` pair shape.
///
/// On failure `value` is `T::default()` and `error` is the raw code.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReturnValue<T> {
    pub value: T,
    pub error: i32,
}

impl<T> ReturnValue<T> {
    pub fn code(&self) -> Option<ErrorCode> {
        ErrorCode::from_raw(self.error)
    }
}

impl<T: Default> From<Result<T, ErrorCode>> for ReturnValue<T> {
    fn from(result: Result<T, ErrorCode>) -> Self {
        match result {
            Ok(value) => ReturnValue {
                value,
                error: ErrorCode::None.to_raw(),
            },
            Err(code) => ReturnValue {
                value: T::default(),
                error: code.to_raw(),
            },
        }
    }
}

/// Convert an engine error into its boundary code.
fn boundary(error: Error) -> ErrorCode {
    let code = error.code();
    tracing::debug!(%error, %code, "boundary call failed");
    code
}

/// Owner of all values and environments handed across the boundary.
#[derive(Default)]
pub struct Session {
    values: HandleTable<ValueSlot>,
    environments: HandleTable<Environment>,
    evaluator: Evaluator,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// A session whose evaluations use `evaluator`.
    pub fn with_evaluator(evaluator: Evaluator) -> Self {
        Session {
            evaluator,
            ..Session::default()
        }
    }

    /// Number of values not yet destroyed.
    pub fn live_values(&self) -> usize {
        self.values.len()
    }

    /// Number of environments not yet destroyed.
    pub fn live_environments(&self) -> usize {
        self.environments.len()
    }

    // Environment

    pub fn environment_create(&mut self) -> EnvHandle {
        let handle = self.environments.insert(Environment::new());
        tracing::debug!(?handle, "environment created");
        handle
    }

    pub fn environment_destroy(&mut self, env: EnvHandle) -> Result<(), ErrorCode> {
        self.environments
            .remove(env)
            .ok_or_else(|| boundary(stale_handle("environment")))?;
        tracing::debug!(handle = ?env, "environment destroyed");
        Ok(())
    }

    pub fn environment(&self, env: EnvHandle) -> Result<&Environment, ErrorCode> {
        self.environments
            .get(env)
            .ok_or_else(|| boundary(stale_handle("environment")))
    }

    fn environment_mut(&mut self, env: EnvHandle) -> Result<&mut Environment, ErrorCode> {
        self.environments
            .get_mut(env)
            .ok_or_else(|| boundary(stale_handle("environment")))
    }

    pub fn environment_set_integer(
        &mut self,
        env: EnvHandle,
        key: &str,
        value: i64,
    ) -> Result<(), ErrorCode> {
        self.environment_mut(env)?.set_integer(key, value);
        Ok(())
    }

    pub fn environment_set_decimal(
        &mut self,
        env: EnvHandle,
        key: &str,
        value: f64,
    ) -> Result<(), ErrorCode> {
        self.environment_mut(env)?.set_decimal(key, value);
        Ok(())
    }

    pub fn environment_set_string(
        &mut self,
        env: EnvHandle,
        key: &str,
        value: &str,
    ) -> Result<(), ErrorCode> {
        self.environment_mut(env)?.set_string(key, value);
        Ok(())
    }

    pub fn environment_get_integer(&self, env: EnvHandle, key: &str) -> Result<i64, ErrorCode> {
        self.environment(env)?.get_integer(key).map_err(boundary)
    }

    pub fn environment_get_decimal(&self, env: EnvHandle, key: &str) -> Result<f64, ErrorCode> {
        self.environment(env)?.get_decimal(key).map_err(boundary)
    }

    pub fn environment_get_string(&self, env: EnvHandle, key: &str) -> Result<&str, ErrorCode> {
        self.environment(env)?.get_string(key).map_err(boundary)
    }

    // Value

    /// Parse one YAML document. `source` must be UTF-8.
    pub fn value_parse_from_string(
        &mut self,
        source: impl AsRef<[u8]>,
    ) -> Result<ValueHandle, ErrorCode> {
        let value = yamlate_parse::parse(source.as_ref()).map_err(boundary)?;
        Ok(self.adopt(value))
    }

    /// Take ownership of `value` and return its handle.
    pub fn adopt(&mut self, value: Value) -> ValueHandle {
        let tag = value.tag();
        let handle = self.values.insert(ValueSlot::new(value));
        tracing::debug!(?handle, %tag, "value created");
        handle
    }

    pub fn value_destroy(&mut self, handle: ValueHandle) -> Result<(), ErrorCode> {
        self.values
            .remove(handle)
            .ok_or_else(|| boundary(stale_handle("value")))?;
        tracing::debug!(?handle, "value destroyed");
        Ok(())
    }

    pub fn value(&self, handle: ValueHandle) -> Result<&Value, ErrorCode> {
        self.slot(handle).map(ValueSlot::value)
    }

    fn slot(&self, handle: ValueHandle) -> Result<&ValueSlot, ErrorCode> {
        self.values
            .get(handle)
            .ok_or_else(|| boundary(stale_handle("value")))
    }

    pub fn value_type(&self, handle: ValueHandle) -> Result<Tag, ErrorCode> {
        self.value(handle).map(Value::tag)
    }

    pub fn value_get_integer(&self, handle: ValueHandle) -> Result<i64, ErrorCode> {
        self.value(handle)?.as_integer().map_err(boundary)
    }

    pub fn value_get_decimal(&self, handle: ValueHandle) -> Result<f64, ErrorCode> {
        self.value(handle)?.as_real().map_err(boundary)
    }

    pub fn value_get_boolean(&self, handle: ValueHandle) -> Result<bool, ErrorCode> {
        self.value(handle)?.as_bool().map_err(boundary)
    }

    /// String payload as a C string. Valid until `handle` is destroyed.
    pub fn value_get_string(&self, handle: ValueHandle) -> Result<&CStr, ErrorCode> {
        let slot = self.slot(handle)?;
        if let Some(cached) = slot.c_string.get() {
            return Ok(cached);
        }
        let text = slot.value.as_str().map_err(boundary)?;
        let c_string = CString::new(text).map_err(|_| boundary(interior_nul()))?;
        Ok(slot.c_string.get_or_init(|| c_string))
    }

    /// Keys of a Hash, in document order.
    pub fn value_hash_keys(&self, handle: ValueHandle) -> Result<Vec<String>, ErrorCode> {
        let keys = self.value(handle)?.hash_keys().map_err(boundary)?;
        Ok(keys.into_iter().map(str::to_owned).collect())
    }

    /// Copy of the entry under `key`, as a new handle.
    pub fn value_hash_get(
        &mut self,
        handle: ValueHandle,
        key: &str,
    ) -> Result<ValueHandle, ErrorCode> {
        let entry = self.value(handle)?.hash_get(key).map_err(boundary)?;
        Ok(self.adopt(entry))
    }

    pub fn value_array_len(&self, handle: ValueHandle) -> Result<usize, ErrorCode> {
        self.value(handle)?.array_len().map_err(boundary)
    }

    /// Copy of the element at `index`, as a new handle. A negative index is
    /// out of range.
    pub fn value_array_get(
        &mut self,
        handle: ValueHandle,
        index: i64,
    ) -> Result<ValueHandle, ErrorCode> {
        let value = self.value(handle)?;
        let len = value.array_len().map_err(boundary)?;
        let position =
            usize::try_from(index).map_err(|_| boundary(index_out_of_bounds(index, len)))?;
        let element = value.array_get(position).map_err(boundary)?;
        Ok(self.adopt(element))
    }

    /// Evaluate the value under `handle` against `env`.
    ///
    /// The input value is untouched; the result is a new handle. `env` may
    /// be mutated by the expression, and changes made before a failure are
    /// kept.
    pub fn value_evaluate(
        &mut self,
        handle: ValueHandle,
        env: EnvHandle,
    ) -> Result<ValueHandle, ErrorCode> {
        let node = self
            .values
            .get(handle)
            .ok_or_else(|| boundary(stale_handle("value")))?;
        let environment = self
            .environments
            .get_mut(env)
            .ok_or_else(|| boundary(stale_handle("environment")))?;
        let result = self
            .evaluator
            .evaluate(&node.value, environment)
            .map_err(boundary)?;
        Ok(self.adopt(result))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
