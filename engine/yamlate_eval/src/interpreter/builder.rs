//! `EvaluatorBuilder` for configuring an [`Evaluator`].

use super::{Evaluator, DEFAULT_MAX_DEPTH};

/// Builder for [`Evaluator`] instances.
#[derive(Clone, Debug)]
pub struct EvaluatorBuilder {
    max_depth: usize,
}

impl Default for EvaluatorBuilder {
    fn default() -> Self {
        EvaluatorBuilder::new()
    }
}

impl EvaluatorBuilder {
    pub fn new() -> Self {
        EvaluatorBuilder {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Maximum node nesting during evaluation. Inline expression levels
    /// count toward the same limit. Exceeding it is an `EvalError`.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn build(self) -> Evaluator {
        Evaluator {
            max_depth: self.max_depth,
        }
    }
}
