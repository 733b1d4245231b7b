//! Conversion from the loader's node tree into [`Value`].

use yaml_rust::Yaml;
use yamlate_ir::errors::{duplicate_key, invalid_yaml, unsupported_node};
use yamlate_ir::{syntax, Hash, Value, YamlResult};
use yamlate_stack::ensure_sufficient_stack;

use crate::inline::parse_inline;

mod duplicates;

pub(crate) use duplicates::reject_duplicate_keys;

/// Convert one loaded node, recursively.
///
/// Errors raised inside a collection carry the path to the failing node.
pub(crate) fn convert(node: &Yaml) -> YamlResult<Value> {
    ensure_sufficient_stack(|| match node {
        Yaml::Integer(i) => Ok(Value::Integer(*i)),
        Yaml::Real(text) if is_core_real(text) => real(node, text).map(Value::Real),
        // The loader accepts words such as `inf` or `NaN`; YAML keeps them as strings.
        Yaml::Real(text) => Ok(Value::String(text.clone())),
        Yaml::String(s) => {
            if syntax::is_inline(s) {
                parse_inline(s)?;
            }
            Ok(Value::String(s.clone()))
        }
        Yaml::Boolean(b) => Ok(Value::Boolean(*b)),
        Yaml::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| convert(item).map_err(|e| e.within_index(index)))
            .collect::<YamlResult<Vec<_>>>()
            .map(Value::Array),
        Yaml::Hash(map) => {
            let mut hash = Hash::with_capacity(map.len());
            for (key, value) in map {
                let key = key_text(key)?;
                let value = convert(value).map_err(|e| e.within(&key))?;
                if hash.contains_key(&key) {
                    return Err(duplicate_key(&key));
                }
                hash.insert(key, value);
            }
            Ok(Value::Hash(hash))
        }
        Yaml::Null => Ok(Value::Null),
        Yaml::Alias(_) => Err(unsupported_node("alias")),
        Yaml::BadValue => Err(unsupported_node("bad value")),
    })
}

fn real(node: &Yaml, text: &str) -> YamlResult<f64> {
    node.as_f64()
        .ok_or_else(|| invalid_yaml(format!("malformed real `{text}`")))
}

/// Core-schema reals: anything numeric, or the `.inf` / `.nan` spellings.
fn is_core_real(text: &str) -> bool {
    if text.bytes().any(|b| b.is_ascii_digit()) {
        return true;
    }
    let unsigned = text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text);
    matches!(unsigned, ".inf" | ".Inf" | ".INF") || matches!(text, ".nan" | ".NaN" | ".NAN")
}

/// Hash keys are text. Scalar keys keep their literal spelling.
fn key_text(key: &Yaml) -> YamlResult<String> {
    match key {
        Yaml::String(s) | Yaml::Real(s) => Ok(s.clone()),
        Yaml::Integer(i) => Ok(i.to_string()),
        Yaml::Boolean(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_owned()),
        Yaml::Array(_) | Yaml::Hash(_) => Err(unsupported_node("collection used as a hash key")),
        Yaml::Alias(_) => Err(unsupported_node("alias")),
        Yaml::BadValue => Err(unsupported_node("bad value")),
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
