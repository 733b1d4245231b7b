//! Yamlate IR - shared data types for the yamlate engine.
//!
//! This crate defines everything the parser and the evaluator agree on:
//!
//! - [`Value`]: the tagged recursive tree produced by parsing and by evaluation
//! - [`Tag`]: the closed enumeration of value types, numbered for the boundary
//! - [`Error`] / [`ErrorKind`] / [`Category`] / [`ErrorCode`]: the error taxonomy
//! - [`Op`], [`Arity`], [`BinaryOp`], [`UnaryOp`]: the operator table
//! - [`Expr`]: the AST of inline (`~>`) expressions
//! - [`syntax`]: the lexical rules that decide whether a node is an expression

pub mod errors;
mod expr;
mod ops;
pub mod syntax;
mod tag;
mod value;

pub use errors::{Category, Error, ErrorCode, ErrorKind, YamlResult};
pub use expr::Expr;
pub use ops::{Arity, BinaryOp, Op, UnaryOp};
pub use tag::Tag;
pub use value::{Hash, Value};
