//! Parsing YAML and JSON catalogs into [`Document`]s.
//!
//! Numbers and booleans are kept as their textual form, `null` becomes an
//! empty string, and YAML tags are dropped. Sequences are rejected: the
//! document model only holds strings and nested mappings.

use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::document::{Document, Node};
use crate::error::{FormatError, FormatResult};
use crate::format::Format;

/// Parse `bytes` as a document in `format`.
///
/// Blank input parses to an empty document.
pub fn parse(bytes: &[u8], format: Format) -> FormatResult<Document> {
    let text = std::str::from_utf8(bytes)?;
    if text.trim().is_empty() {
        return Ok(Document::new());
    }

    match format {
        Format::Yaml => {
            let value: YamlValue = serde_yaml::from_str(text)?;
            yaml_root(value)
        }
        Format::Json => {
            let value: JsonValue = serde_json::from_str(text)?;
            json_root(value)
        }
    }
}

fn yaml_root(value: YamlValue) -> FormatResult<Document> {
    match value {
        YamlValue::Null => Ok(Document::new()),
        YamlValue::Mapping(map) => yaml_mapping(map, ""),
        YamlValue::Tagged(tagged) => yaml_root(tagged.value),
        other => Err(FormatError::NotAMapping(yaml_kind(&other))),
    }
}

fn yaml_mapping(map: serde_yaml::Mapping, parent: &str) -> FormatResult<Document> {
    let mut doc = Document::new();
    for (key, value) in map {
        let key = yaml_key(key, parent)?;
        let path = child_path(parent, &key);
        let node = yaml_node(value, &path)?;
        doc.insert(key, node);
    }
    Ok(doc)
}

fn yaml_key(key: YamlValue, parent: &str) -> FormatResult<String> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        other => Err(FormatError::UnsupportedValue {
            path: child_path(parent, "<key>"),
            kind: yaml_kind(&other),
        }),
    }
}

fn yaml_node(value: YamlValue, path: &str) -> FormatResult<Node> {
    match value {
        YamlValue::Null => Ok(Node::Scalar(String::new())),
        YamlValue::Bool(b) => Ok(Node::Scalar(b.to_string())),
        YamlValue::Number(n) => Ok(Node::Scalar(n.to_string())),
        YamlValue::String(s) => Ok(Node::Scalar(s)),
        YamlValue::Mapping(map) => Ok(Node::Map(yaml_mapping(map, path)?)),
        YamlValue::Tagged(tagged) => yaml_node(tagged.value, path),
        YamlValue::Sequence(_) => Err(FormatError::UnsupportedValue {
            path: path.to_string(),
            kind: "sequence",
        }),
    }
}

fn yaml_kind(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "boolean",
        YamlValue::Number(_) => "number",
        YamlValue::String(_) => "string",
        YamlValue::Sequence(_) => "sequence",
        YamlValue::Mapping(_) => "mapping",
        YamlValue::Tagged(_) => "tagged value",
    }
}

fn json_root(value: JsonValue) -> FormatResult<Document> {
    match value {
        JsonValue::Null => Ok(Document::new()),
        JsonValue::Object(map) => json_object(map, ""),
        other => Err(FormatError::NotAMapping(json_kind(&other))),
    }
}

fn json_object(map: serde_json::Map<String, JsonValue>, parent: &str) -> FormatResult<Document> {
    let mut doc = Document::new();
    for (key, value) in map {
        let path = child_path(parent, &key);
        let node = match value {
            JsonValue::Null => Node::Scalar(String::new()),
            JsonValue::Bool(b) => Node::Scalar(b.to_string()),
            JsonValue::Number(n) => Node::Scalar(n.to_string()),
            JsonValue::String(s) => Node::Scalar(s),
            JsonValue::Object(inner) => Node::Map(json_object(inner, &path)?),
            JsonValue::Array(_) => {
                return Err(FormatError::UnsupportedValue {
                    path,
                    kind: "array",
                })
            }
        };
        doc.insert(key, node);
    }
    Ok(doc)
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}
