//! Classification of raw fragments into operations and definitions.
//!
//! Each fragment must parse as a YAML mapping. A mapping with a
//! `definition` key contributes a named schema; anything else must carry
//! both a `method` and a `path` key and contributes one operation. The
//! routing keys are stripped and the rest of the mapping is passed through
//! verbatim, so any Swagger construct an author writes (parameters,
//! responses, `$ref`, vendor extensions) survives untouched.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::diagnostics::MalformedBlock;
use crate::extractor::RawBlock;

/// The HTTP methods Swagger 2.0 allows inside a path item.
///
/// Declaration order is the order the keys appear in the emitted document.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    /// Parses a method name case-insensitively. `GET`, `get` and `Get`
    /// all name the same method.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "get" => Some(HttpMethod::Get),
            "post" => Some(HttpMethod::Post),
            "put" => Some(HttpMethod::Put),
            "delete" => Some(HttpMethod::Delete),
            "patch" => Some(HttpMethod::Patch),
            "options" => Some(HttpMethod::Options),
            "head" => Some(HttpMethod::Head),
            _ => None,
        }
    }

    /// The lowercase Swagger path item key.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        };
        f.write_str(name)
    }
}

/// One operation contributed by a block, keyed by `(path, method)`.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationEntry {
    pub path: String,
    pub method: HttpMethod,
    /// The parsed mapping minus the `method` and `path` keys.
    pub spec: Value,
    pub source: PathBuf,
}

/// One named schema contributed by a block, keyed by its name.
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionEntry {
    pub name: String,
    /// The parsed mapping minus the `definition` key.
    pub schema: Value,
    pub source: PathBuf,
}

/// A classified block, ready for assembly.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Operation(OperationEntry),
    Definition(DefinitionEntry),
}

fn malformed(block: &RawBlock, reason: impl Into<String>) -> MalformedBlock {
    MalformedBlock {
        source: block.source.to_path_buf(),
        reason: reason.into(),
    }
}

fn yaml_key(name: &str) -> Value {
    Value::String(name.to_string())
}

/// Classifies one raw fragment.
///
/// The `definition` key takes precedence: a mapping that has one is a
/// definition even if `method` or `path` are also present (those keys then
/// stay in the schema untouched).
pub fn classify(block: &RawBlock) -> Result<Entry, MalformedBlock> {
    let value: Value = serde_yaml::from_str(block.text)
        .map_err(|e| malformed(block, format!("parse failure: {}", e)))?;
    let mut mapping = match value {
        Value::Mapping(mapping) => mapping,
        _ => return Err(malformed(block, "block is not a YAML mapping")),
    };

    if let Some(name_value) = mapping.remove(&yaml_key("definition")) {
        let name = match name_value {
            Value::String(name) if !name.is_empty() => name,
            _ => {
                return Err(malformed(
                    block,
                    "`definition` name must be a non-empty string",
                ))
            }
        };
        return Ok(Entry::Definition(DefinitionEntry {
            name,
            schema: Value::Mapping(mapping),
            source: block.source.to_path_buf(),
        }));
    }

    let method_value = mapping.remove(&yaml_key("method"));
    let path_value = mapping.remove(&yaml_key("path"));
    let (method_value, path_value) = match (method_value, path_value) {
        (Some(method), Some(path)) => (method, path),
        (Some(_), None) => {
            return Err(malformed(block, "operation block is missing the `path` key"))
        }
        (None, Some(_)) => {
            return Err(malformed(
                block,
                "operation block is missing the `method` key",
            ))
        }
        (None, None) => {
            return Err(malformed(
                block,
                "block declares neither an operation nor a definition",
            ))
        }
    };

    let method_name = match method_value.as_str() {
        Some(name) => name,
        None => return Err(malformed(block, "`method` must be a string")),
    };
    let method = HttpMethod::from_name(method_name).ok_or_else(|| {
        malformed(block, format!("unrecognized HTTP method `{}`", method_name))
    })?;
    let path = match path_value {
        Value::String(path) if !path.is_empty() => path,
        _ => return Err(malformed(block, "`path` must be a non-empty string")),
    };

    Ok(Entry::Operation(OperationEntry {
        path,
        method,
        spec: Value::Mapping(mapping),
        source: block.source.to_path_buf(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn block(text: &str) -> RawBlock<'_> {
        RawBlock {
            source: Path::new("views.py"),
            text,
            start: 0,
            end: text.len(),
        }
    }

    fn classify_err(text: &str) -> String {
        classify(&block(text)).unwrap_err().reason
    }

    #[test]
    fn test_classifies_operation() {
        let text = "\npath: /snippets\nmethod: get\nsummary: List snippets\nresponses:\n  200:\n    description: OK\n";
        let entry = classify(&block(text)).unwrap();
        let Entry::Operation(op) = entry else {
            panic!("expected an operation");
        };
        assert_eq!(op.path, "/snippets");
        assert_eq!(op.method, HttpMethod::Get);
        assert_eq!(op.source, Path::new("views.py"));
        assert_eq!(
            op.spec.get("summary").and_then(Value::as_str),
            Some("List snippets")
        );
        // Routing keys are stripped from the passthrough spec.
        assert!(op.spec.get("path").is_none());
        assert!(op.spec.get("method").is_none());
        // Non-string YAML keys survive the passthrough.
        let responses = op.spec.get("responses").unwrap();
        assert!(responses.get(Value::from(200)).is_some());
    }

    #[test]
    fn test_classifies_definition() {
        let text = "definition: Snippet\ntype: object\nproperties:\n  title:\n    type: string\n";
        let Entry::Definition(def) = classify(&block(text)).unwrap() else {
            panic!("expected a definition");
        };
        assert_eq!(def.name, "Snippet");
        assert!(def.schema.get("definition").is_none());
        assert_eq!(def.schema.get("type").and_then(Value::as_str), Some("object"));
    }

    #[test]
    fn test_definition_takes_precedence_over_routing_keys() {
        let text = "definition: Weird\nmethod: get\npath: /x\n";
        let Entry::Definition(def) = classify(&block(text)).unwrap() else {
            panic!("expected a definition");
        };
        assert_eq!(def.name, "Weird");
        // The routing keys stay in the schema untouched.
        assert_eq!(def.schema.get("method").and_then(Value::as_str), Some("get"));
        assert_eq!(def.schema.get("path").and_then(Value::as_str), Some("/x"));
    }

    #[test]
    fn test_method_is_case_insensitive() {
        for name in ["GET", "get", "Get", "gEt"] {
            let text = format!("path: /pets\nmethod: {}\n", name);
            let Entry::Operation(op) = classify(&block(&text)).unwrap() else {
                panic!("expected an operation");
            };
            assert_eq!(op.method, HttpMethod::Get);
        }
    }

    #[test]
    fn test_parse_failure() {
        let reason = classify_err("path: /pets\n  bad indent: [\n");
        assert!(reason.starts_with("parse failure: "), "got: {}", reason);
    }

    #[test]
    fn test_non_mapping_blocks() {
        assert_eq!(classify_err("- a\n- b\n"), "block is not a YAML mapping");
        assert_eq!(classify_err("just a scalar"), "block is not a YAML mapping");
        assert_eq!(classify_err(""), "block is not a YAML mapping");
    }

    #[test]
    fn test_missing_routing_keys() {
        assert_eq!(
            classify_err("summary: no routing keys\n"),
            "block declares neither an operation nor a definition"
        );
        assert_eq!(
            classify_err("path: /pets\n"),
            "operation block is missing the `method` key"
        );
        assert_eq!(
            classify_err("method: get\n"),
            "operation block is missing the `path` key"
        );
    }

    #[test]
    fn test_bad_method_values() {
        assert_eq!(classify_err("path: /p\nmethod: 7\n"), "`method` must be a string");
        assert_eq!(
            classify_err("path: /p\nmethod: fetch\n"),
            "unrecognized HTTP method `fetch`"
        );
    }

    #[test]
    fn test_bad_path_values() {
        assert_eq!(
            classify_err("path: ''\nmethod: get\n"),
            "`path` must be a non-empty string"
        );
        assert_eq!(
            classify_err("path: 42\nmethod: get\n"),
            "`path` must be a non-empty string"
        );
    }

    #[test]
    fn test_bad_definition_names() {
        assert_eq!(
            classify_err("definition: ''\ntype: object\n"),
            "`definition` name must be a non-empty string"
        );
        assert_eq!(
            classify_err("definition: [not, a, name]\n"),
            "`definition` name must be a non-empty string"
        );
    }

    #[test]
    fn test_malformed_reason_carries_source_path() {
        let err = classify(&block("- listed")).unwrap_err();
        assert_eq!(err.source, Path::new("views.py"));
    }

    #[test]
    fn test_http_method_display_and_key() {
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert_eq!(HttpMethod::Delete.as_str(), "delete");
        assert_eq!(HttpMethod::from_name("bogus"), None);
    }
}
