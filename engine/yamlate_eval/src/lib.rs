//! Yamlate Eval - environment and evaluator.
//!
//! # Architecture
//!
//! - [`Environment`]: typed variable store (Integer, Real, String bindings)
//! - [`Evaluator`]: tree-walking evaluation of a [`Value`] node against an
//!   environment, configured through [`EvaluatorBuilder`]
//! - [`evaluate_binary`] / [`evaluate_unary`]: direct enum dispatch for the
//!   value-level operators shared by array operations and inline expressions
//!
//! Evaluation never mutates its input node. The environment changes only
//! through `set`, `inc`, `dec`, `consume` and inline `:=` / `=`.

mod environment;
pub mod interpreter;
mod operators;
mod unary_operators;

pub use environment::{Binding, Environment};
pub use interpreter::{evaluate, Evaluator, EvaluatorBuilder, DEFAULT_MAX_DEPTH};
pub use operators::{evaluate_binary, values_equal};
pub use unary_operators::evaluate_unary;
pub use yamlate_ir::{Value, YamlResult};
