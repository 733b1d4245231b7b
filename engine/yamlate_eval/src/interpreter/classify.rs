//! Node classification.
//!
//! Every value falls into exactly one [`Node`] class, decided from the node
//! alone (never from the environment).

use yamlate_ir::{syntax, Hash, Op, Value};

/// How a value node is evaluated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Node<'a> {
    /// Integer, Real, Boolean, Null, or a String that is neither an inline
    /// expression nor a reference. Evaluates to a copy of itself.
    Literal,
    /// `~>` string; holds the full text.
    Inline(&'a str),
    /// `$name` string; holds the name without the sigil.
    Reference(&'a str),
    /// Array whose first element names an operator.
    Operation { op: Op, operands: &'a [Value] },
    /// Any other array. Elements are evaluated in order.
    Sequence(&'a [Value]),
    /// Any other hash. Values are evaluated in key order.
    Mapping(&'a Hash),
    /// Hash whose first key is `case`, `when` or `if`.
    Branch { form: BranchForm, hash: &'a Hash },
}

/// Hash branch forms, named by their first key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchForm {
    Case,
    When,
    If,
}

impl BranchForm {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            syntax::CASE => Some(BranchForm::Case),
            syntax::WHEN => Some(BranchForm::When),
            syntax::IF => Some(BranchForm::If),
            _ => None,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            BranchForm::Case => syntax::CASE,
            BranchForm::When => syntax::WHEN,
            BranchForm::If => syntax::IF,
        }
    }
}

/// Classify `node`.
pub fn classify(node: &Value) -> Node<'_> {
    match node {
        Value::String(text) => {
            if syntax::is_inline(text) {
                Node::Inline(text)
            } else if let Some(name) = syntax::reference_name(text) {
                Node::Reference(name)
            } else {
                Node::Literal
            }
        }
        Value::Array(items) => match items.split_first() {
            Some((Value::String(head), operands)) => match Op::lookup(head) {
                Some(op) => Node::Operation { op, operands },
                None => Node::Sequence(items),
            },
            _ => Node::Sequence(items),
        },
        Value::Hash(hash) => match hash.keys().next().and_then(|key| BranchForm::from_key(key)) {
            Some(form) => Node::Branch { form, hash },
            None => Node::Mapping(hash),
        },
        Value::Integer(_) | Value::Real(_) | Value::Boolean(_) | Value::Null => Node::Literal,
    }
}
