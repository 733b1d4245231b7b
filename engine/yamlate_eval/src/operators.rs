//! Binary operator implementations.
//!
//! Direct enum dispatch on the operand pair. Integer arithmetic is checked;
//! mixed Integer/Real operands promote the Integer to Real. No other
//! coercion happens: strings, booleans and collections only combine with
//! their own kind, and only for the operators listed per kind below.

use std::cmp::Ordering;

use yamlate_ir::errors::{division_by_zero, integer_overflow, modulo_by_zero, operand_mismatch};
use yamlate_ir::{BinaryOp, Error, Tag, Value, YamlResult};

// Checked arithmetic helpers

#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> YamlResult<Value> {
    result
        .map(Value::Integer)
        .ok_or_else(|| integer_overflow(op_name))
}

#[inline]
fn checked_div(a: i64, b: i64) -> YamlResult<Value> {
    if b == 0 {
        Err(division_by_zero())
    } else {
        checked_arith(a.checked_div(b), "division")
    }
}

#[inline]
fn checked_mod(a: i64, b: i64) -> YamlResult<Value> {
    if b == 0 {
        Err(modulo_by_zero())
    } else {
        checked_arith(a.checked_rem(b), "remainder")
    }
}

/// Integer to Real promotion for mixed operands.
#[expect(
    clippy::cast_precision_loss,
    reason = "mixed arithmetic is defined as Real arithmetic"
)]
#[inline]
pub(crate) fn promote(i: i64) -> f64 {
    i as f64
}

/// Evaluate a binary operation on two evaluated operands.
///
/// `And` and `Or` here are the strict forms; the evaluator short-circuits
/// before calling this.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> YamlResult<Value> {
    match op {
        BinaryOp::Eq => return Ok(Value::Boolean(values_equal(left, right))),
        BinaryOp::NotEq => return Ok(Value::Boolean(!values_equal(left, right))),
        _ => {}
    }

    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => eval_int_binary(*a, *b, op),
        (Value::Real(a), Value::Real(b)) => eval_real_binary(*a, *b, op),
        (Value::Integer(a), Value::Real(b)) => eval_real_binary(promote(*a), *b, op),
        (Value::Real(a), Value::Integer(b)) => eval_real_binary(*a, promote(*b), op),
        (Value::String(a), Value::String(b)) => eval_string_binary(a, b, op),
        (Value::Boolean(a), Value::Boolean(b)) => eval_bool_binary(*a, *b, op),
        _ => Err(mismatch(left, right, op)),
    }
}

/// Structural equality.
///
/// Integers and Reals compare numerically; any other pair of differing tags
/// is unequal. Hash equality ignores key order.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Real(a), Value::Real(b)) => real_equal(*a, *b),
        (Value::Integer(a), Value::Real(b)) | (Value::Real(b), Value::Integer(a)) => {
            real_equal(promote(*a), *b)
        }
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Hash(a), Value::Hash(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| values_equal(x, y)))
        }
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}

/// IEEE equality: NaN equals nothing, `-0.0` equals `0.0`.
fn real_equal(a: f64, b: f64) -> bool {
    a.partial_cmp(&b) == Some(Ordering::Equal)
}

#[cold]
fn mismatch(left: &Value, right: &Value, op: BinaryOp) -> Error {
    operand_mismatch(op.as_symbol(), left.tag(), right.tag())
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> YamlResult<Value> {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => checked_div(a, b),
        BinaryOp::Mod => checked_mod(a, b),
        BinaryOp::Pow => eval_int_pow(a, b),
        BinaryOp::Lt => Ok(Value::Boolean(a < b)),
        BinaryOp::LtEq => Ok(Value::Boolean(a <= b)),
        BinaryOp::Gt => Ok(Value::Boolean(a > b)),
        BinaryOp::GtEq => Ok(Value::Boolean(a >= b)),
        _ => Err(mismatch(&Value::Integer(a), &Value::Integer(b), op)),
    }
}

/// Non-negative exponents stay Integer; negative ones produce a Real.
fn eval_int_pow(base: i64, exponent: i64) -> YamlResult<Value> {
    if exponent < 0 {
        return Ok(Value::Real(promote(base).powf(promote(exponent))));
    }
    // Bases with a bounded power stay exact for any exponent.
    match base {
        0 => return Ok(Value::Integer(i64::from(exponent == 0))),
        1 => return Ok(Value::Integer(1)),
        -1 => return Ok(Value::Integer(if exponent % 2 == 0 { 1 } else { -1 })),
        _ => {}
    }
    u32::try_from(exponent)
        .ok()
        .and_then(|exponent| base.checked_pow(exponent))
        .map(Value::Integer)
        .ok_or_else(|| integer_overflow("exponentiation"))
}

fn eval_real_binary(a: f64, b: f64, op: BinaryOp) -> YamlResult<Value> {
    // partial_cmp keeps IEEE semantics: every comparison with NaN is false
    let ordering = a.partial_cmp(&b);
    match op {
        BinaryOp::Add => Ok(Value::Real(a + b)),
        BinaryOp::Sub => Ok(Value::Real(a - b)),
        BinaryOp::Mul => Ok(Value::Real(a * b)),
        BinaryOp::Div => Ok(Value::Real(a / b)),
        BinaryOp::Mod => Ok(Value::Real(a % b)),
        BinaryOp::Pow => Ok(Value::Real(a.powf(b))),
        BinaryOp::Lt => Ok(Value::Boolean(ordering == Some(Ordering::Less))),
        BinaryOp::LtEq => Ok(Value::Boolean(matches!(
            ordering,
            Some(Ordering::Less | Ordering::Equal)
        ))),
        BinaryOp::Gt => Ok(Value::Boolean(ordering == Some(Ordering::Greater))),
        BinaryOp::GtEq => Ok(Value::Boolean(matches!(
            ordering,
            Some(Ordering::Greater | Ordering::Equal)
        ))),
        _ => Err(mismatch(&Value::Real(a), &Value::Real(b), op)),
    }
}

fn eval_string_binary(a: &str, b: &str, op: BinaryOp) -> YamlResult<Value> {
    match op {
        BinaryOp::Add => Ok(Value::String(format!("{a}{b}"))),
        // Lexicographic comparison
        BinaryOp::Lt => Ok(Value::Boolean(a < b)),
        BinaryOp::LtEq => Ok(Value::Boolean(a <= b)),
        BinaryOp::Gt => Ok(Value::Boolean(a > b)),
        BinaryOp::GtEq => Ok(Value::Boolean(a >= b)),
        _ => Err(operand_mismatch(op.as_symbol(), Tag::String, Tag::String)),
    }
}

fn eval_bool_binary(a: bool, b: bool, op: BinaryOp) -> YamlResult<Value> {
    match op {
        BinaryOp::And => Ok(Value::Boolean(a && b)),
        BinaryOp::Or => Ok(Value::Boolean(a || b)),
        _ => Err(mismatch(&Value::Boolean(a), &Value::Boolean(b), op)),
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
