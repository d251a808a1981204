//! Serializing [`Document`]s back to YAML or JSON.
//!
//! The YAML writer is deliberately narrow: block mappings with two-space
//! indentation and every scalar value double-quoted. Quoting keeps the
//! translation platform from reading `yes`, `1.0` or `~` as anything other
//! than a string.

use serde_json::{Map, Value as JsonValue};

use crate::document::{Document, Node};
use crate::error::FormatResult;
use crate::format::Format;

const INDENT: &str = "  ";

/// YAML 1.1 words that a plain key would be read as a non-string.
const RESERVED_WORDS: &[&str] = &[
    "true", "false", "yes", "no", "on", "off", "null", "y", "n", "~",
];

/// Serialize `doc` in `format`.
pub fn serialize(doc: &Document, format: Format) -> FormatResult<Vec<u8>> {
    match format {
        Format::Yaml => Ok(to_yaml(doc).into_bytes()),
        Format::Json => {
            let mut out = serde_json::to_vec_pretty(&to_json(doc))?;
            out.push(b'\n');
            Ok(out)
        }
    }
}

fn to_yaml(doc: &Document) -> String {
    if doc.is_empty() {
        return "{}\n".to_string();
    }
    let mut out = String::new();
    write_yaml_mapping(doc, 0, &mut out);
    out
}

fn write_yaml_mapping(doc: &Document, depth: usize, out: &mut String) {
    for (key, node) in doc.iter() {
        for _ in 0..depth {
            out.push_str(INDENT);
        }
        write_yaml_key(key, out);
        out.push(':');
        match node {
            Node::Scalar(value) => {
                out.push(' ');
                write_double_quoted(value, out);
                out.push('\n');
            }
            Node::Map(inner) if inner.is_empty() => out.push_str(" {}\n"),
            Node::Map(inner) => {
                out.push('\n');
                write_yaml_mapping(inner, depth + 1, out);
            }
        }
    }
}

fn write_yaml_key(key: &str, out: &mut String) {
    if is_plain_key(key) {
        out.push_str(key);
    } else {
        write_double_quoted(key, out);
    }
}

fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    let starts_ok = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    starts_ok
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/'))
        && !RESERVED_WORDS.contains(&key.to_ascii_lowercase().as_str())
}

fn write_double_quoted(value: &str, out: &mut String) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn to_json(doc: &Document) -> JsonValue {
    let mut map = Map::new();
    for (key, node) in doc.iter() {
        let value = match node {
            Node::Scalar(s) => JsonValue::String(s.clone()),
            Node::Map(inner) => to_json(inner),
        };
        map.insert(key.to_string(), value);
    }
    JsonValue::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn yaml(doc: &Document) -> String {
        String::from_utf8(serialize(doc, Format::Yaml).unwrap()).unwrap()
    }

    #[test]
    fn yaml_quotes_every_scalar() {
        let mut message = Document::new();
        message.insert("message", "Goodbye!");
        let mut en = Document::new();
        en.insert("goodbye", message);
        en.insert("flag", "yes");
        let mut doc = Document::new();
        doc.insert("en", en);

        assert_eq!(
            yaml(&doc),
            "en:\n  goodbye:\n    message: \"Goodbye!\"\n  flag: \"yes\"\n"
        );
    }

    #[test]
    fn yaml_quotes_unsafe_keys() {
        let doc: Document = [("404", "a"), ("no", "b"), ("with space", "c"), ("en-US", "d")]
            .into_iter()
            .collect();
        assert_eq!(
            yaml(&doc),
            "\"404\": \"a\"\n\"no\": \"b\"\n\"with space\": \"c\"\nen-US: \"d\"\n"
        );
    }

    #[test]
    fn yaml_escapes_specials() {
        let doc: Document = [("k", "say \"hi\"\\\nbye\u{7}")].into_iter().collect();
        assert_eq!(yaml(&doc), "k: \"say \\\"hi\\\"\\\\\\nbye\\u0007\"\n");
    }

    #[test]
    fn yaml_empty_maps() {
        assert_eq!(yaml(&Document::new()), "{}\n");
        let mut doc = Document::new();
        doc.insert("empty", Document::new());
        assert_eq!(yaml(&doc), "empty: {}\n");
    }

    #[test]
    fn yaml_output_parses_back() {
        let source = "en:\n  count: 1.0\n  answer: yes\n  quote: \"it's \\\"ok\\\"\"\n  multi: \"a\\nb\"\n";
        let doc = parse(source.as_bytes(), Format::Yaml).unwrap();
        let reparsed = parse(yaml(&doc).as_bytes(), Format::Yaml).unwrap();
        assert_eq!(reparsed, doc);
    }

    #[test]
    fn json_is_pretty_and_ordered() {
        let mut inner = Document::new();
        inner.insert("z", "1");
        inner.insert("a", "2");
        let mut doc = Document::new();
        doc.insert("root", inner);

        let out = String::from_utf8(serialize(&doc, Format::Json).unwrap()).unwrap();
        assert_eq!(out, "{\n  \"root\": {\n    \"z\": \"1\",\n    \"a\": \"2\"\n  }\n}\n");
    }
}
