//! Tree-walking evaluator.
//!
//! [`Evaluator::evaluate`] walks a [`Value`] node and produces a new, owned
//! [`Value`]. Each node is first classified (see [`classify`]) and then
//! evaluated by the matching handler:
//!
//! - `operations.rs`: `[op, operand...]` arrays
//! - `branches.rs`: `case` / `when` / `if` hashes
//! - `inline.rs`: `~>` expressions
//!
//! Operands are evaluated left to right, so a later operand observes
//! environment changes made by an earlier one. Evaluation is not
//! transactional: a change made before a failure stays in place.

mod branches;
mod builder;
mod classify;
mod inline;
mod operations;

use yamlate_ir::errors::{depth_limit, invalid_operand};
use yamlate_ir::{Value, YamlResult};
use yamlate_stack::ensure_sufficient_stack;

use crate::Environment;

pub use builder::EvaluatorBuilder;
pub use classify::{classify, BranchForm, Node};

/// Default bound on node nesting during evaluation.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Evaluates value nodes against an environment.
///
/// The evaluator itself is stateless apart from configuration; all mutable
/// state lives in the [`Environment`] passed to each call.
#[derive(Clone, Debug)]
pub struct Evaluator {
    max_depth: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        EvaluatorBuilder::new().build()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Evaluator::default()
    }

    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::new()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Evaluate `node`. The result never aliases `node`.
    #[tracing::instrument(level = "debug", skip_all, fields(tag = %node.tag()))]
    pub fn evaluate(&self, node: &Value, env: &mut Environment) -> YamlResult<Value> {
        let result = self.walker(env).eval(node);
        if let Err(error) = &result {
            tracing::debug!(%error, "evaluation failed");
        }
        result
    }

    /// Parse and evaluate a single inline expression.
    ///
    /// The `~>` marker is optional here.
    pub fn evaluate_inline(&self, text: &str, env: &mut Environment) -> YamlResult<Value> {
        self.walker(env).eval_inline(text)
    }

    fn walker<'env>(&self, env: &'env mut Environment) -> Walker<'env> {
        Walker {
            env,
            depth: 0,
            max_depth: self.max_depth,
        }
    }
}

/// Evaluate `node` with a default-configured [`Evaluator`].
pub fn evaluate(node: &Value, env: &mut Environment) -> YamlResult<Value> {
    Evaluator::default().evaluate(node, env)
}

/// Per-call evaluation state.
pub(crate) struct Walker<'env> {
    env: &'env mut Environment,
    depth: usize,
    max_depth: usize,
}

impl Walker<'_> {
    /// Evaluate one node, one nesting level deeper.
    fn eval(&mut self, node: &Value) -> YamlResult<Value> {
        self.nested(|walker| walker.eval_node(node))
    }

    /// Run `f` one level deeper, enforcing the depth limit.
    fn nested<R>(&mut self, f: impl FnOnce(&mut Self) -> YamlResult<R>) -> YamlResult<R> {
        if self.depth >= self.max_depth {
            return Err(depth_limit(self.max_depth));
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| f(self));
        self.depth -= 1;
        result
    }

    fn eval_node(&mut self, node: &Value) -> YamlResult<Value> {
        match classify(node) {
            Node::Literal => Ok(node.clone()),
            Node::Inline(text) => self.eval_inline(text),
            Node::Reference(name) => self.env.value(name),
            Node::Operation { op, operands } => self.eval_operation(op, operands),
            Node::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| self.eval(item).map_err(|e| e.within_index(index)))
                .collect::<YamlResult<Vec<_>>>()
                .map(Value::Array),
            Node::Mapping(hash) => hash
                .iter()
                .map(|(key, value)| {
                    self.eval(value)
                        .map(|value| (key.clone(), value))
                        .map_err(|e| e.within(key))
                })
                .collect::<YamlResult<_>>()
                .map(Value::Hash),
            Node::Branch { form, hash } => self.eval_branch(form, hash),
        }
    }
}

/// A condition must be a Boolean.
fn condition(op: &'static str, value: &Value) -> YamlResult<bool> {
    match value {
        Value::Boolean(b) => Ok(*b),
        other => Err(invalid_operand(op, other.tag())),
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
