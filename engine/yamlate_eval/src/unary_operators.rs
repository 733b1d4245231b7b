//! Unary operator implementations.

use yamlate_ir::errors::{integer_overflow, invalid_operand};
use yamlate_ir::{UnaryOp, Value, YamlResult};

/// Evaluate a unary operation.
///
/// `-` applies to Integer (checked) and Real; `!` applies to Boolean only.
pub fn evaluate_unary(operand: &Value, op: UnaryOp) -> YamlResult<Value> {
    match (op, operand) {
        (UnaryOp::Neg, Value::Integer(i)) => i
            .checked_neg()
            .map(Value::Integer)
            .ok_or_else(|| integer_overflow("negation")),
        (UnaryOp::Neg, Value::Real(r)) => Ok(Value::Real(-r)),
        (UnaryOp::Not, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
        (op, other) => Err(invalid_operand(op.as_symbol(), other.tag())),
    }
}
