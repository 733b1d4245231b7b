//! Parser for yamlate documents.
//!
//! Turns YAML source text into a [`Value`] tree. Every inline expression
//! (`~>` string) in the document is syntax-checked on the way, so a document
//! that parses never fails later with a syntax error. Parsing is pure: no
//! environment is consulted and unresolved identifiers are legal.
//!
//! # Entry points
//!
//! - [`parse`]: raw bytes, validated as UTF-8, exactly one document
//! - [`parse_str`]: the same for text that is already a `&str`
//! - [`parse_all`]: every document of a multi-document stream
//! - [`parse_inline`]: a single inline expression

mod inline;
mod yaml;

use yamlate_ir::errors::{document_count, invalid_encoding, invalid_yaml};
use yamlate_ir::{Value, YamlResult};
use yaml_rust::{Yaml, YamlLoader};

pub use inline::parse_inline;

/// Parse a single YAML document from raw bytes.
///
/// Fails with an `InvalidString` error if the bytes are not UTF-8, the YAML
/// is malformed, the stream does not hold exactly one document, or an inline
/// expression in it does not parse.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &[u8]) -> YamlResult<Value> {
    let text = std::str::from_utf8(source).map_err(|e| invalid_encoding(e.to_string()))?;
    parse_str(text)
}

/// Parse a single YAML document.
pub fn parse_str(source: &str) -> YamlResult<Value> {
    let mut documents = load(source)?;
    if documents.len() != 1 {
        return Err(document_count(documents.len()));
    }
    match documents.pop() {
        Some(document) => yaml::convert(&document),
        None => Err(document_count(0)),
    }
}

/// Parse every document of a YAML stream, in order.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse_all(source: &str) -> YamlResult<Vec<Value>> {
    load(source)?.iter().map(yaml::convert).collect()
}

fn load(source: &str) -> YamlResult<Vec<Yaml>> {
    let documents = YamlLoader::load_from_str(source).map_err(|e| invalid_yaml(e.to_string()))?;
    yaml::reject_duplicate_keys(source)?;
    tracing::debug!(documents = documents.len(), "loaded YAML stream");
    Ok(documents)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
