use crate::{BinaryOp, UnaryOp, Value};

/// Parsed inline (`~>`) expression.
///
/// Produced by the parser, interpreted by the evaluator. Literals hold only
/// scalar values (Integer, Real, String, Boolean, Null).
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// A literal like `2`, `1.5` or `"hello"`.
    Literal(Value),
    /// A variable to read from the environment.
    Variable(String),
    /// A unary operator like `!` or `-`.
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// A binary operator like `+` or `&&`.
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `name := value`: bind, overwriting any previous binding.
    Declare { name: String, value: Box<Expr> },
    /// `name = value`: overwrite an existing binding.
    Assign { name: String, value: Box<Expr> },
}

impl Expr {
    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}
