//! Array operations: `[op, operand...]`.
//!
//! Operand positions in error locations count the operator, so the first
//! operand is `[1]`.

use smallvec::SmallVec;
use yamlate_ir::errors::{arity_mismatch, integer_overflow, invalid_target, no_matching_branch, wrong_type};
use yamlate_ir::{syntax, BinaryOp, Op, UnaryOp, Value, YamlResult};

use super::{condition, Walker};
use crate::environment::Binding;
use crate::{evaluate_binary, evaluate_unary};

/// Evaluated operands. Most operations take two.
type Operands = SmallVec<[Value; 4]>;

impl Walker<'_> {
    pub(super) fn eval_operation(&mut self, op: Op, operands: &[Value]) -> YamlResult<Value> {
        let arity = op.arity();
        if !arity.accepts(operands.len()) {
            return Err(arity_mismatch(op.name(), arity.describe(), operands.len()));
        }
        tracing::trace!(op = op.name(), operands = operands.len(), "apply operator");

        match op {
            Op::Add => self.fold(BinaryOp::Add, operands),
            Op::Sub if operands.len() == 1 => self.eval_unary(UnaryOp::Neg, operands),
            Op::Sub => self.fold(BinaryOp::Sub, operands),
            Op::Mul => self.fold(BinaryOp::Mul, operands),
            Op::Div => self.fold(BinaryOp::Div, operands),
            Op::Mod => self.fold(BinaryOp::Mod, operands),
            Op::Pow => self.fold(BinaryOp::Pow, operands),
            Op::Eq => self.fold(BinaryOp::Eq, operands),
            Op::NotEq => self.fold(BinaryOp::NotEq, operands),
            Op::Lt => self.fold(BinaryOp::Lt, operands),
            Op::LtEq => self.fold(BinaryOp::LtEq, operands),
            Op::Gt => self.fold(BinaryOp::Gt, operands),
            Op::GtEq => self.fold(BinaryOp::GtEq, operands),
            Op::And => self.eval_logic(Op::And, operands),
            Op::Or => self.eval_logic(Op::Or, operands),
            Op::Not => self.eval_unary(UnaryOp::Not, operands),
            Op::If => self.eval_if(operands),
            Op::Do => {
                let mut last = Value::Null;
                for index in 0..operands.len() {
                    last = self.operand(operands, index)?;
                }
                Ok(last)
            }
            Op::Quote => Ok(operands[0].clone()),
            Op::Defined => {
                let name = target(op, &operands[0])?;
                Ok(Value::Boolean(self.env.contains(name)))
            }
            Op::Set => {
                let name = target(op, &operands[0])?;
                let value = self.operand(operands, 1)?;
                let binding = Binding::try_from(value.clone()).map_err(|e| e.within_index(2))?;
                self.env.set(name, binding);
                Ok(value)
            }
            Op::Inc | Op::Dec => self.eval_step(op, operands),
            Op::Consume => {
                let name = target(op, &operands[0])?;
                let current = self.env.get_integer(name)?;
                if current > 0 {
                    self.env.set(name, Binding::Integer(current - 1));
                    Ok(Value::Boolean(true))
                } else {
                    Ok(Value::Boolean(false))
                }
            }
        }
    }

    /// Evaluate the operand at `index` (0-based, after the operator).
    fn operand(&mut self, operands: &[Value], index: usize) -> YamlResult<Value> {
        self.eval(&operands[index])
            .map_err(|e| e.within_index(index + 1))
    }

    /// Evaluate every operand, then combine left to right.
    fn fold(&mut self, op: BinaryOp, operands: &[Value]) -> YamlResult<Value> {
        let values: Operands = (0..operands.len())
            .map(|index| self.operand(operands, index))
            .collect::<YamlResult<_>>()?;

        let mut values = values.into_iter().enumerate();
        let Some((_, first)) = values.next() else {
            return Ok(Value::Null);
        };
        values.try_fold(first, |acc, (index, value)| {
            evaluate_binary(&acc, &value, op).map_err(|e| e.within_index(index + 1))
        })
    }

    fn eval_unary(&mut self, op: UnaryOp, operands: &[Value]) -> YamlResult<Value> {
        let operand = self.operand(operands, 0)?;
        evaluate_unary(&operand, op).map_err(|e| e.within_index(1))
    }

    /// `and` stops at the first false operand, `or` at the first true one.
    /// Operands past that point are not evaluated.
    fn eval_logic(&mut self, op: Op, operands: &[Value]) -> YamlResult<Value> {
        let stop_on = op == Op::Or;
        for index in 0..operands.len() {
            let value = self.operand(operands, index)?;
            if condition(op.name(), &value).map_err(|e| e.within_index(index + 1))? == stop_on {
                tracing::trace!(op = op.name(), index, "short-circuit");
                return Ok(Value::Boolean(stop_on));
            }
        }
        Ok(Value::Boolean(!stop_on))
    }

    fn eval_if(&mut self, operands: &[Value]) -> YamlResult<Value> {
        let cond = self.operand(operands, 0)?;
        if condition(Op::If.name(), &cond).map_err(|e| e.within_index(1))? {
            self.operand(operands, 1)
        } else if operands.len() == 3 {
            self.operand(operands, 2)
        } else {
            Err(no_matching_branch())
        }
    }

    /// `inc` / `dec`: adjust an Integer binding by an optional amount.
    fn eval_step(&mut self, op: Op, operands: &[Value]) -> YamlResult<Value> {
        let name = target(op, &operands[0])?;
        let amount = if operands.len() == 2 {
            match self.operand(operands, 1)? {
                Value::Integer(amount) => amount,
                other => return Err(wrong_type("integer", other.tag()).within_index(2)),
            }
        } else {
            1
        };

        let current = self.env.get_integer(name)?;
        let next = if op == Op::Inc {
            current.checked_add(amount)
        } else {
            current.checked_sub(amount)
        }
        .ok_or_else(|| integer_overflow(op.name()))?;

        self.env.set(name, Binding::Integer(next));
        Ok(Value::Integer(next))
    }
}

/// Name operands are taken literally: an identifier, `$` optional.
fn target(op: Op, operand: &Value) -> YamlResult<&str> {
    match operand {
        Value::String(text) => {
            syntax::target_name(text).ok_or_else(|| invalid_target(op.name(), text.as_str()))
        }
        other => Err(invalid_target(op.name(), other.to_string())),
    }
    .map_err(|e| e.within_index(1))
}
