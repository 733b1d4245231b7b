//! Stack growth for recursive descent over untrusted input.
//!
//! YAML documents and inline expressions can nest arbitrarily deep. The
//! parser's tree conversion, the inline expression parser and the evaluator
//! all recurse once per nesting level, so each recursive step goes through
//! [`ensure_sufficient_stack`].
//!
//! On native targets the stack is extended with `stacker` when less than
//! [`RED_ZONE`] bytes remain. On `wasm32` the closure is called directly.
//!
//! Stack growth only prevents overflow. Nesting depth is still bounded
//! separately by the evaluator's configured maximum.

/// Remaining stack below which a new segment is allocated.
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
pub const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Run `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
