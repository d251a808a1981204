use locsync_diff::{diff_between, diff_content};
use locsync_document::{Format, FormatError};
use locsync_types::{BranchResource, Resource};

/// Strip the common leading indentation and the leading newline, so YAML
/// fixtures can be written indented inline.
fn outdent(text: &str) -> String {
    let text = text.strip_prefix('\n').unwrap_or(text);
    let margin = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);
    text.lines()
        .map(|l| if l.len() >= margin { &l[margin..] } else { l.trim_start() })
        .filter(|l| !l.is_empty())
        .map(|l| format!("{l}\n"))
        .collect()
}

fn yaml_resource() -> Resource {
    Resource::new(
        "project_slug",
        "resource_slug",
        "YAML",
        "en",
        "source_file",
        "",
        "translation_file",
    )
}

fn diff(head: &str, base: &str) -> Option<String> {
    diff_between(outdent(head).as_bytes(), outdent(base).as_bytes(), &yaml_resource())
        .unwrap()
        .map(|bytes| String::from_utf8(bytes).unwrap())
}

#[test]
fn phrases_added_to_head_are_included() {
    let head = "
        en:
          welcome:
            message: Hello!
          goodbye:
            message: Goodbye!
    ";
    let base = "
        en:
          welcome:
            message: Hello!
    ";

    let expected = outdent(
        r#"
        en:
          goodbye:
            message: "Goodbye!"
        "#,
    );
    assert_eq!(diff(head, base), Some(expected));
}

#[test]
fn phrases_removed_from_head_yield_none() {
    let head = "
        en:
          welcome: Hello
    ";
    let base = "
        en:
          welcome: Hello
          goodbye: Goodbye
    ";
    assert_eq!(diff(head, base), None);
}

#[test]
fn phrases_modified_in_head_are_included() {
    let head = "
        en:
          welcome: Hello world
          goodbye: Goodbye
    ";
    let base = "
        en:
          welcome: Hello
          goodbye: Goodbye
    ";

    let expected = outdent(
        r#"
        en:
          welcome: "Hello world"
        "#,
    );
    assert_eq!(diff(head, base), Some(expected));
}

#[test]
fn unchanged_content_yields_none() {
    let content = "
        en:
          welcome: Hello
          goodbye: Goodbye
    ";
    assert_eq!(diff(content, content), None);
}

#[test]
fn branch_resource_uses_base_type() {
    let resource = BranchResource::new(yaml_resource(), "heads/feature");
    let out = diff_between(b"en:\n  a: b\n", b"", &resource).unwrap();
    assert_eq!(out.as_deref(), Some(&b"en:\n  a: \"b\"\n"[..]));
}

#[test]
fn json_resources_diff_as_json() {
    let resource = Resource::new("p", "r", "KEYVALUEJSON", "en", "en.json", "", "<lang>.json");
    let head = br#"{"greeting": "Hi", "nav": {"home": "Home", "about": "About us"}}"#;
    let base = br#"{"greeting": "Hi", "nav": {"home": "Home", "about": "About"}}"#;

    let out = diff_between(head, base, &resource).unwrap().unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\n  \"nav\": {\n    \"about\": \"About us\"\n  }\n}\n"
    );
}

#[test]
fn malformed_head_is_a_format_error() {
    let err = diff_content(b"en: [broken", b"en: {}\n", Format::Yaml).unwrap_err();
    assert!(matches!(err, FormatError::Yaml(_)));
}

#[test]
fn malformed_base_is_a_format_error() {
    let err = diff_content(b"{}", b"{ nope", Format::Json).unwrap_err();
    assert!(matches!(err, FormatError::Json(_)));
}

#[test]
fn unsupported_resource_type_is_a_format_error() {
    let resource = Resource::new("p", "r", "PO", "en", "en.po", "", "<lang>.po");
    let err = diff_between(b"", b"", &resource).unwrap_err();
    assert!(matches!(err, FormatError::UnsupportedType(_)));
}
