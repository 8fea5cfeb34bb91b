/*!
 * Nested (JSON) locale documents.
 *
 * Every value is either a translation string or another object of the same
 * shape. Anything else is rejected while decoding, with the dotted path of the
 * offending node in the error.
 */

use indexmap::IndexMap;
use serde_json::Value;

use crate::errors::LintError;

/// Children of a nested node, in document order
pub type LocaleMap = IndexMap<String, LocaleNode>;

/// A node of a nested locale document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleNode {
    /// A translation string
    Text(String),
    /// A group of further nodes
    Nested(LocaleMap),
}

/// A decoded nested locale document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleTree {
    root: LocaleMap,
}

impl LocaleTree {
    /// Decode a JSON document whose top level is an object
    pub fn from_json(content: &str) -> Result<Self, LintError> {
        let value: Value = serde_json::from_str(content)?;
        match value {
            Value::Object(map) => Ok(Self {
                root: decode_map(map, None)?,
            }),
            other => Err(LintError::UnexpectedValue {
                key: "<root>".to_string(),
                found: type_name(&other),
            }),
        }
    }

    /// Top-level entries in document order
    pub fn root(&self) -> &LocaleMap {
        &self.root
    }

    /// Number of translation strings in the tree
    pub fn leaf_count(&self) -> usize {
        fn count(map: &LocaleMap) -> usize {
            map.values()
                .map(|node| match node {
                    LocaleNode::Text(_) => 1,
                    LocaleNode::Nested(children) => count(children),
                })
                .sum()
        }
        count(&self.root)
    }
}

fn decode_map(
    map: serde_json::Map<String, Value>,
    parent: Option<&str>,
) -> Result<LocaleMap, LintError> {
    let mut nodes = LocaleMap::with_capacity(map.len());
    for (key, value) in map {
        let path = match parent {
            Some(parent) => format!("{}.{}", parent, key),
            None => key.clone(),
        };
        let node = match value {
            Value::String(text) => LocaleNode::Text(text),
            Value::Object(children) => LocaleNode::Nested(decode_map(children, Some(&path))?),
            other => {
                return Err(LintError::UnexpectedValue {
                    key: path,
                    found: type_name(&other),
                });
            }
        };
        nodes.insert(key, node);
    }
    Ok(nodes)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
