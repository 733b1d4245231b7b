//! Operator tables.
//!
//! [`Op`] is the closed set of operators an array node can name in its first
//! element. [`BinaryOp`] and [`UnaryOp`] are the value-level operations shared
//! by array operators and inline (`~>`) expressions.

/// Operator named by the first element of an operation array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logic
    And,
    Or,
    Not,

    // Structure
    If,
    Do,
    Quote,

    // Environment
    Defined,
    Set,
    Inc,
    Dec,
    Consume,
}

impl Op {
    pub const ALL: [Op; 23] = [
        Op::Add,
        Op::Sub,
        Op::Mul,
        Op::Div,
        Op::Mod,
        Op::Pow,
        Op::Eq,
        Op::NotEq,
        Op::Lt,
        Op::LtEq,
        Op::Gt,
        Op::GtEq,
        Op::And,
        Op::Or,
        Op::Not,
        Op::If,
        Op::Do,
        Op::Quote,
        Op::Defined,
        Op::Set,
        Op::Inc,
        Op::Dec,
        Op::Consume,
    ];

    /// Word spelling. Always usable unquoted in YAML.
    pub const fn name(self) -> &'static str {
        match self {
            Op::Add => "add",
            Op::Sub => "sub",
            Op::Mul => "mul",
            Op::Div => "div",
            Op::Mod => "mod",
            Op::Pow => "pow",
            Op::Eq => "eq",
            Op::NotEq => "ne",
            Op::Lt => "lt",
            Op::LtEq => "le",
            Op::Gt => "gt",
            Op::GtEq => "ge",
            Op::And => "and",
            Op::Or => "or",
            Op::Not => "not",
            Op::If => "if",
            Op::Do => "do",
            Op::Quote => "quote",
            Op::Defined => "defined",
            Op::Set => "set",
            Op::Inc => "inc",
            Op::Dec => "dec",
            Op::Consume => "consume",
        }
    }

    /// Symbol spelling, if the operator has one.
    ///
    /// Several symbols are YAML indicators (`*`, `%`, `!`, `&`, `>`, `|`) and
    /// must be quoted when written as a plain scalar.
    pub const fn symbol(self) -> Option<&'static str> {
        match self {
            Op::Add => Some("+"),
            Op::Sub => Some("-"),
            Op::Mul => Some("*"),
            Op::Div => Some("/"),
            Op::Mod => Some("%"),
            Op::Pow => Some("^"),
            Op::Eq => Some("=="),
            Op::NotEq => Some("!="),
            Op::Lt => Some("<"),
            Op::LtEq => Some("<="),
            Op::Gt => Some(">"),
            Op::GtEq => Some(">="),
            Op::And => Some("&&"),
            Op::Or => Some("||"),
            Op::Not => Some("!"),
            Op::If
            | Op::Do
            | Op::Quote
            | Op::Defined
            | Op::Set
            | Op::Inc
            | Op::Dec
            | Op::Consume => None,
        }
    }

    /// Resolve a word or symbol spelling.
    pub fn lookup(spelling: &str) -> Option<Op> {
        Op::ALL
            .into_iter()
            .find(|op| op.name() == spelling || op.symbol() == Some(spelling))
    }

    /// Whether evaluating this operator may change the environment.
    pub const fn is_mutating(self) -> bool {
        matches!(self, Op::Set | Op::Inc | Op::Dec | Op::Consume)
    }

    /// Accepted operand counts, not counting the operator itself.
    pub const fn arity(self) -> Arity {
        match self {
            Op::Add | Op::Mul | Op::Div | Op::Mod => Arity::at_least(2),
            Op::Sub | Op::And | Op::Or | Op::Do => Arity::at_least(1),
            Op::Pow
            | Op::Eq
            | Op::NotEq
            | Op::Lt
            | Op::LtEq
            | Op::Gt
            | Op::GtEq
            | Op::Set => Arity::exactly(2),
            Op::Not | Op::Quote | Op::Defined | Op::Consume => Arity::exactly(1),
            Op::If => Arity::between(2, 3),
            Op::Inc | Op::Dec => Arity::between(1, 2),
        }
    }
}

/// Operand count bounds of an [`Op`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    /// `None` for variadic operators.
    pub max: Option<usize>,
}

impl Arity {
    pub const fn exactly(count: usize) -> Self {
        Arity {
            min: count,
            max: Some(count),
        }
    }

    pub const fn at_least(min: usize) -> Self {
        Arity { min, max: None }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Arity {
            min,
            max: Some(max),
        }
    }

    pub fn accepts(self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }

    /// Human wording, as used in arity errors.
    pub const fn describe(self) -> &'static str {
        match (self.min, self.max) {
            (1, Some(1)) => "1",
            (2, Some(2)) => "2",
            (1, Some(2)) => "1 or 2",
            (2, Some(3)) => "2 or 3",
            (1, None) => "at least 1",
            (2, None) => "at least 2",
            _ => "a different number of",
        }
    }
}

/// Binary operation on two values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

/// Unary operation on one value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_word_and_symbol() {
        assert_eq!(Op::lookup("add"), Some(Op::Add));
        assert_eq!(Op::lookup("+"), Some(Op::Add));
        assert_eq!(Op::lookup("ne"), Some(Op::NotEq));
        assert_eq!(Op::lookup("!="), Some(Op::NotEq));
        assert_eq!(Op::lookup("consume"), Some(Op::Consume));
        assert_eq!(Op::lookup("plus"), None);
        assert_eq!(Op::lookup(""), None);
    }

    #[test]
    fn test_spellings_are_unique() {
        let mut seen = Vec::new();
        for op in Op::ALL {
            seen.push(op.name());
            seen.extend(op.symbol());
        }
        let total = seen.len();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), total);
    }

    #[test]
    fn test_only_environment_ops_mutate() {
        let mutating: Vec<Op> = Op::ALL.into_iter().filter(|op| op.is_mutating()).collect();
        assert_eq!(mutating, vec![Op::Set, Op::Inc, Op::Dec, Op::Consume]);
    }

    #[test]
    fn test_arity() {
        assert!(Op::Add.arity().accepts(2));
        assert!(Op::Add.arity().accepts(9));
        assert!(!Op::Add.arity().accepts(1));
        assert!(Op::Sub.arity().accepts(1));
        assert!(!Op::Pow.arity().accepts(3));
        assert!(Op::If.arity().accepts(3));
        assert!(!Op::If.arity().accepts(4));
        assert!(!Op::Consume.arity().accepts(0));
    }

    #[test]
    fn test_arity_wording() {
        for op in Op::ALL {
            assert_ne!(op.arity().describe(), "a different number of", "{op:?}");
        }
        assert_eq!(Op::Inc.arity().describe(), "1 or 2");
    }
}
