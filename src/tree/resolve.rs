//! Path resolution against a parsed JSON document.

use serde_json::{Map, Value};
use thiserror::Error;

use super::path::PathComponents;

/// Error type for resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The path does not name any value.
    #[error("404")]
    NotFound,

    /// The document could not be read.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The document is not a JSON object.
    #[error("{0}")]
    Parse(String),
}

impl From<serde_json::Error> for ResolveError {
    fn from(e: serde_json::Error) -> Self {
        ResolveError::Parse(e.to_string())
    }
}

/// Parse `document` and resolve `path` against it.
pub fn resolve_bytes(path: &PathComponents, document: &[u8]) -> Result<Value, ResolveError> {
    let root = match serde_json::from_slice::<Value>(document)? {
        Value::Object(map) => map,
        other => {
            return Err(ResolveError::Parse(format!(
                "document root must be a JSON object, found {}",
                kind(&other)
            )))
        }
    };
    resolve(path, root)
}

/// Walk `path` through `root`.
///
/// Objects are descended into while components remain. Landing on anything
/// else ends the walk: it is the result only if it is the last component and
/// not `null`.
pub fn resolve(path: &PathComponents, root: Map<String, Value>) -> Result<Value, ResolveError> {
    let mut current = root;
    let components = path.as_slice();

    for (i, key) in components.iter().enumerate() {
        let is_last = i + 1 == components.len();
        match current.remove(key) {
            Some(Value::Object(subtree)) => current = subtree,
            Some(Value::Null) | None => return Err(ResolveError::NotFound),
            Some(_) if !is_last => return Err(ResolveError::NotFound),
            Some(leaf) => return Ok(leaf),
        }
    }

    Ok(Value::Object(current))
}

/// Render a resolved value as a READ body.
///
/// String leaves are emitted unquoted; everything else is pretty JSON.
pub fn to_body(value: &Value) -> Result<String, ResolveError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Ok(serde_json::to_string_pretty(other)?),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
