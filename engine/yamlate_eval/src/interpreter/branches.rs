//! Hash branch forms: `case`, `when` and `if`.
//!
//! Only the selected branch is evaluated.

use yamlate_ir::errors::{malformed_form, no_matching_branch, wrong_type};
use yamlate_ir::{syntax, Error, Hash, Value, YamlResult};

use super::{condition, BranchForm, Walker};

impl Walker<'_> {
    pub(super) fn eval_branch(&mut self, form: BranchForm, hash: &Hash) -> YamlResult<Value> {
        match form {
            BranchForm::Case => self.eval_case(hash),
            BranchForm::When => self.eval_when(hash),
            BranchForm::If => self.eval_if_form(hash),
        }
    }

    /// Evaluate the entry under `key`, tagging errors with the key.
    fn eval_entry(&mut self, hash: &Hash, key: &str) -> Option<YamlResult<Value>> {
        let node = hash.get(key)?;
        Some(self.eval(node).map_err(|e| e.within(key)))
    }

    /// `{case: subject, label: branch, ..., default: branch}`
    fn eval_case(&mut self, hash: &Hash) -> YamlResult<Value> {
        let subject = self
            .eval_entry(hash, syntax::CASE)
            .unwrap_or(Ok(Value::Null))?;
        let label = match &subject {
            Value::String(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Boolean(b) => b.to_string(),
            other => {
                return Err(wrong_type("string, integer or boolean", other.tag()).within(syntax::CASE))
            }
        };

        let selected = hash
            .keys()
            .find(|key| !matches!(key.as_str(), syntax::CASE | syntax::DEFAULT) && **key == label)
            .map_or(syntax::DEFAULT, String::as_str);
        tracing::trace!(%label, branch = selected, "case");

        self.eval_entry(hash, selected)
            .unwrap_or_else(|| Err(no_matching_branch()))
    }

    /// `{when: [[cond, result], ...], else: result}`
    fn eval_when(&mut self, hash: &Hash) -> YamlResult<Value> {
        reject_unknown_keys(BranchForm::When, hash, &[syntax::WHEN, syntax::ELSE])?;
        let clauses = when_clauses(hash)?;

        for (index, (cond, result)) in clauses.into_iter().enumerate() {
            let locate = |e: Error, position: usize| {
                e.within_index(position).within_index(index).within(syntax::WHEN)
            };
            let value = self.eval(cond).map_err(|e| locate(e, 0))?;
            if condition(syntax::WHEN, &value).map_err(|e| locate(e, 0))? {
                tracing::trace!(clause = index, "when");
                return self.eval(result).map_err(|e| locate(e, 1));
            }
        }

        tracing::trace!("when: else");
        self.eval_entry(hash, syntax::ELSE)
            .unwrap_or_else(|| Err(no_matching_branch()))
    }

    /// `{if: cond, then: a, else: b}`
    fn eval_if_form(&mut self, hash: &Hash) -> YamlResult<Value> {
        reject_unknown_keys(BranchForm::If, hash, &[syntax::IF, syntax::THEN, syntax::ELSE])?;
        if !hash.contains_key(syntax::THEN) {
            return Err(malformed_form(syntax::IF, "missing `then`"));
        }

        let cond = self
            .eval_entry(hash, syntax::IF)
            .unwrap_or(Ok(Value::Null))?;
        let taken = condition(syntax::IF, &cond).map_err(|e| e.within(syntax::IF))?;
        let branch = if taken { syntax::THEN } else { syntax::ELSE };
        tracing::trace!(branch, "if");

        self.eval_entry(hash, branch)
            .unwrap_or_else(|| Err(no_matching_branch()))
    }
}

fn reject_unknown_keys(form: BranchForm, hash: &Hash, allowed: &[&str]) -> YamlResult<()> {
    match hash.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(malformed_form(form.key(), format!("unexpected key `{key}`"))),
        None => Ok(()),
    }
}

/// Validate the clause list before anything is evaluated.
fn when_clauses(hash: &Hash) -> YamlResult<Vec<(&Value, &Value)>> {
    let Some(Value::Array(clauses)) = hash.get(syntax::WHEN) else {
        return Err(malformed_form(syntax::WHEN, "expected a list of [condition, result] pairs"));
    };

    clauses
        .iter()
        .enumerate()
        .map(|(index, clause)| match clause {
            Value::Array(pair) if pair.len() == 2 => Ok((&pair[0], &pair[1])),
            _ => Err(malformed_form(
                syntax::WHEN,
                format!("clause {index} is not a [condition, result] pair"),
            )),
        })
        .collect()
}
