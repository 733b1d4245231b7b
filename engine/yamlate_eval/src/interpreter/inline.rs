//! Inline (`~>`) expression evaluation.

use yamlate_ir::errors::undefined_variable;
use yamlate_ir::{BinaryOp, Expr, Value, YamlResult};
use yamlate_parse::parse_inline;

use super::{condition, Walker};
use crate::environment::Binding;
use crate::{evaluate_binary, evaluate_unary};

impl Walker<'_> {
    pub(super) fn eval_inline(&mut self, text: &str) -> YamlResult<Value> {
        let expr = parse_inline(text)?;
        self.eval_expr(&expr)
    }

    fn eval_expr(&mut self, expr: &Expr) -> YamlResult<Value> {
        self.nested(|walker| walker.eval_expr_inner(expr))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> YamlResult<Value> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Variable(name) => self.env.value(name),
            Expr::Unary { op, operand } => {
                let operand = self.eval_expr(operand)?;
                evaluate_unary(&operand, *op)
            }
            Expr::Binary {
                op: op @ (BinaryOp::And | BinaryOp::Or),
                left,
                right,
            } => {
                // Short-circuit: the right side only runs if it decides the result
                let stop_on = *op == BinaryOp::Or;
                let left = self.eval_expr(left)?;
                if condition(op.as_symbol(), &left)? == stop_on {
                    return Ok(Value::Boolean(stop_on));
                }
                let right = self.eval_expr(right)?;
                condition(op.as_symbol(), &right).map(Value::Boolean)
            }
            Expr::Binary { op, left, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                evaluate_binary(&left, &right, *op)
            }
            Expr::Declare { name, value } => {
                let value = self.eval_expr(value)?;
                self.bind(name, value)
            }
            Expr::Assign { name, value } => {
                if !self.env.contains(name) {
                    return Err(undefined_variable(name));
                }
                let value = self.eval_expr(value)?;
                self.bind(name, value)
            }
        }
    }

    fn bind(&mut self, name: &str, value: Value) -> YamlResult<Value> {
        self.env.set(name, Binding::try_from(value.clone())?);
        Ok(value)
    }
}
