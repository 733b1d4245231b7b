//! Error taxonomy for parsing, navigation and evaluation.
//!
//! Every failure in the engine is an [`Error`] carrying a structured
//! [`ErrorKind`]. Kinds group into five [`Category`] values, and each
//! category maps onto the [`ErrorCode`] returned at the boundary.
//!
//! Errors are built through the factory functions in this module
//! (`wrong_type`, `undefined_variable`, `division_by_zero`, ...) rather than
//! by naming variants at call sites, so message wording lives in one place.

use std::fmt;

use crate::Tag;

/// Result of any fallible engine operation.
pub type YamlResult<T> = Result<T, Error>;

/// Coarse error category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// An accessor or operator was applied to a value of an incompatible tag.
    WrongType,
    /// An environment lookup or hash key missed.
    NotDefined,
    /// Malformed source text, or a string payload that cannot be represented.
    InvalidString,
    /// Evaluation failures not covered by the other categories.
    EvalError,
    /// An array index outside `[0, len)`.
    OutOfRange,
}

impl Category {
    /// Boundary code for this category.
    ///
    /// The boundary has no dedicated out-of-range code; index misses are
    /// reported as `NotDefined`, like hash key misses.
    pub const fn code(self) -> ErrorCode {
        match self {
            Category::WrongType => ErrorCode::WrongType,
            Category::NotDefined | Category::OutOfRange => ErrorCode::NotDefined,
            Category::InvalidString => ErrorCode::InvalidString,
            Category::EvalError => ErrorCode::EvalError,
        }
    }
}

/// Error code returned alongside every fallible boundary result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    None = 0,
    WrongType = -1,
    NotDefined = -2,
    InvalidString = -3,
    EvalError = -4,
}

impl ErrorCode {
    /// Every code, success first.
    pub const ALL: [ErrorCode; 5] = [
        ErrorCode::None,
        ErrorCode::WrongType,
        ErrorCode::NotDefined,
        ErrorCode::InvalidString,
        ErrorCode::EvalError,
    ];

    pub const fn to_raw(self) -> i32 {
        self as i32
    }

    pub fn from_raw(raw: i32) -> Option<Self> {
        ErrorCode::ALL.into_iter().find(|code| code.to_raw() == raw)
    }

    /// Protocol name of the code.
    pub const fn name(self) -> &'static str {
        match self {
            ErrorCode::None => "NONE",
            ErrorCode::WrongType => "WRONG_TYPE",
            ErrorCode::NotDefined => "NOT_DEFINED",
            ErrorCode::InvalidString => "INVALID_STRING",
            ErrorCode::EvalError => "EVAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structured error detail.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    // Type
    #[error("type mismatch: expected {expected}, got {got}")]
    WrongType { expected: &'static str, got: Tag },
    #[error("operator `{op}` cannot be applied to {left} and {right}")]
    OperandMismatch {
        op: &'static str,
        left: Tag,
        right: Tag,
    },
    #[error("operator `{op}` cannot be applied to {operand}")]
    InvalidOperand { op: &'static str, operand: Tag },
    #[error("variable `{name}` is bound to {got}, not {expected}")]
    BindingType { name: String, expected: Tag, got: Tag },
    #[error("unknown type tag {raw}")]
    UnknownTag { raw: i32 },

    // Lookup
    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },
    #[error("key not found: {key}")]
    KeyNotFound { key: String },
    #[error("stale or unknown {kind} handle")]
    StaleHandle { kind: &'static str },

    // Range
    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: i64, len: usize },

    // Source text
    #[error("source is not valid UTF-8: {message}")]
    InvalidEncoding { message: String },
    #[error("invalid YAML: {message}")]
    InvalidYaml { message: String },
    #[error("expected exactly one YAML document, found {found}")]
    DocumentCount { found: usize },
    #[error("unsupported YAML node: {what}")]
    UnsupportedNode { what: &'static str },
    #[error("duplicate hash key: {key}")]
    DuplicateKey { key: String },
    #[error("invalid inline expression `{text}`: {message} at column {column}")]
    InvalidExpression {
        text: String,
        message: String,
        column: usize,
    },
    #[error("string contains an interior NUL byte")]
    InteriorNul,

    // Evaluation
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: &'static str },
    #[error("`{op}` expects {expected} operands, got {got}")]
    ArityMismatch {
        op: &'static str,
        expected: &'static str,
        got: usize,
    },
    #[error("no branch matched")]
    NoMatchingBranch,
    #[error("`{op}` expects a variable name, got {got}")]
    InvalidTarget { op: &'static str, got: String },
    #[error("malformed `{form}` form: {message}")]
    MalformedForm { form: &'static str, message: String },
    #[error("maximum nesting depth exceeded (limit: {limit})")]
    DepthLimit { limit: usize },
}

impl ErrorKind {
    pub const fn category(&self) -> Category {
        match self {
            ErrorKind::WrongType { .. }
            | ErrorKind::OperandMismatch { .. }
            | ErrorKind::InvalidOperand { .. }
            | ErrorKind::BindingType { .. }
            | ErrorKind::UnknownTag { .. } => Category::WrongType,

            ErrorKind::UndefinedVariable { .. }
            | ErrorKind::KeyNotFound { .. }
            | ErrorKind::StaleHandle { .. } => Category::NotDefined,

            ErrorKind::IndexOutOfBounds { .. } => Category::OutOfRange,

            ErrorKind::InvalidEncoding { .. }
            | ErrorKind::InvalidYaml { .. }
            | ErrorKind::DocumentCount { .. }
            | ErrorKind::UnsupportedNode { .. }
            | ErrorKind::DuplicateKey { .. }
            | ErrorKind::InvalidExpression { .. }
            | ErrorKind::InteriorNul => Category::InvalidString,

            ErrorKind::DivisionByZero
            | ErrorKind::ModuloByZero
            | ErrorKind::IntegerOverflow { .. }
            | ErrorKind::ArityMismatch { .. }
            | ErrorKind::NoMatchingBranch
            | ErrorKind::InvalidTarget { .. }
            | ErrorKind::MalformedForm { .. }
            | ErrorKind::DepthLimit { .. } => Category::EvalError,
        }
    }
}

/// Engine error: a kind plus the location in the value tree where it arose.
///
/// The location is a path relative to the node the failing operation was
/// called on (`beetle.wing_color.spring`, `items[2]`). It is built up as the
/// error propagates out of nested nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    location: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Error {
            kind,
            location: None,
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Boundary code for this error.
    pub fn code(&self) -> ErrorCode {
        self.kind.category().code()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Prefix the location with a hash key segment.
    #[must_use]
    pub fn within(self, key: &str) -> Self {
        self.prefixed(key)
    }

    /// Prefix the location with an array index segment.
    #[must_use]
    pub fn within_index(self, index: usize) -> Self {
        self.prefixed(&format!("[{index}]"))
    }

    fn prefixed(mut self, segment: &str) -> Self {
        self.location = Some(match self.location.take() {
            Some(inner) if inner.starts_with('[') => format!("{segment}{inner}"),
            Some(inner) => format!("{segment}.{inner}"),
            None => segment.to_owned(),
        });
        self
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} (at {location})", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

// Type Errors

#[cold]
pub fn wrong_type(expected: &'static str, got: Tag) -> Error {
    ErrorKind::WrongType { expected, got }.into()
}

#[cold]
pub fn operand_mismatch(op: &'static str, left: Tag, right: Tag) -> Error {
    ErrorKind::OperandMismatch { op, left, right }.into()
}

#[cold]
pub fn invalid_operand(op: &'static str, operand: Tag) -> Error {
    ErrorKind::InvalidOperand { op, operand }.into()
}

#[cold]
pub fn binding_type(name: &str, expected: Tag, got: Tag) -> Error {
    ErrorKind::BindingType {
        name: name.to_owned(),
        expected,
        got,
    }
    .into()
}

#[cold]
pub fn unknown_tag(raw: i32) -> Error {
    ErrorKind::UnknownTag { raw }.into()
}

// Lookup Errors

#[cold]
pub fn undefined_variable(name: &str) -> Error {
    ErrorKind::UndefinedVariable {
        name: name.to_owned(),
    }
    .into()
}

#[cold]
pub fn key_not_found(key: &str) -> Error {
    ErrorKind::KeyNotFound {
        key: key.to_owned(),
    }
    .into()
}

#[cold]
pub fn stale_handle(kind: &'static str) -> Error {
    ErrorKind::StaleHandle { kind }.into()
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> Error {
    ErrorKind::IndexOutOfBounds { index, len }.into()
}

// Source Text Errors

#[cold]
pub fn invalid_encoding(message: impl Into<String>) -> Error {
    ErrorKind::InvalidEncoding {
        message: message.into(),
    }
    .into()
}

#[cold]
pub fn invalid_yaml(message: impl Into<String>) -> Error {
    ErrorKind::InvalidYaml {
        message: message.into(),
    }
    .into()
}

#[cold]
pub fn document_count(found: usize) -> Error {
    ErrorKind::DocumentCount { found }.into()
}

#[cold]
pub fn unsupported_node(what: &'static str) -> Error {
    ErrorKind::UnsupportedNode { what }.into()
}

#[cold]
pub fn duplicate_key(key: &str) -> Error {
    ErrorKind::DuplicateKey {
        key: key.to_owned(),
    }
    .into()
}

#[cold]
pub fn invalid_expression(text: &str, message: impl Into<String>, column: usize) -> Error {
    ErrorKind::InvalidExpression {
        text: text.to_owned(),
        message: message.into(),
        column,
    }
    .into()
}

#[cold]
pub fn interior_nul() -> Error {
    ErrorKind::InteriorNul.into()
}

// Evaluation Errors

#[cold]
pub fn division_by_zero() -> Error {
    ErrorKind::DivisionByZero.into()
}

#[cold]
pub fn modulo_by_zero() -> Error {
    ErrorKind::ModuloByZero.into()
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> Error {
    ErrorKind::IntegerOverflow { operation }.into()
}

#[cold]
pub fn arity_mismatch(op: &'static str, expected: &'static str, got: usize) -> Error {
    ErrorKind::ArityMismatch { op, expected, got }.into()
}

#[cold]
pub fn no_matching_branch() -> Error {
    ErrorKind::NoMatchingBranch.into()
}

#[cold]
pub fn invalid_target(op: &'static str, got: impl Into<String>) -> Error {
    ErrorKind::InvalidTarget {
        op,
        got: got.into(),
    }
    .into()
}

#[cold]
pub fn malformed_form(form: &'static str, message: impl Into<String>) -> Error {
    ErrorKind::MalformedForm {
        form,
        message: message.into(),
    }
    .into()
}

#[cold]
pub fn depth_limit(limit: usize) -> Error {
    ErrorKind::DepthLimit { limit }.into()
}
