//! Parser for the INI-style translation config.
//!
//! The config has an optional `[main]` section with project-wide settings and
//! one `[project.resource]` section per translatable file:
//!
//! ```text
//! [main]
//! host = https://www.transifex.com
//! lang_map = pt-BR:pt
//!
//! [my-project.app-strings]
//! source_file = config/locales/en.yml
//! source_lang = en
//! type = YAML
//! file_filter = config/locales/<lang>.yml
//! ```
//!
//! Lines starting with `#` or `;` are comments. A resource without its own
//! `lang_map` inherits the one from `[main]`.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::resource::Resource;

const MAIN_SECTION: &str = "main";
const REQUIRED_KEYS: &[&str] = &["source_file", "source_lang", "type", "file_filter"];

/// The resources and settings declared by a translation config.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TxConfig {
    resources: Vec<Resource>,
    settings: BTreeMap<String, String>,
}

impl TxConfig {
    pub fn new(resources: Vec<Resource>, settings: BTreeMap<String, String>) -> Self {
        Self {
            resources,
            settings,
        }
    }

    /// Parse config text.
    ///
    /// Fails with [`ConfigError::Malformed`] on lines that are neither a
    /// section header nor `key = value`, [`ConfigError::InvalidSection`] on a
    /// resource section without a `.`, and [`ConfigError::MissingField`] when
    /// a resource lacks a required key.
    pub fn parse(text: &str) -> ConfigResult<Self> {
        let sections = parse_sections(text)?;

        let settings = sections
            .iter()
            .find(|(name, _)| name == MAIN_SECTION)
            .map(|(_, values)| values.clone())
            .unwrap_or_default();

        let mut resources = Vec::new();
        let default_lang_map = settings.get("lang_map").cloned().unwrap_or_default();
        for (name, values) in sections {
            if name == MAIN_SECTION {
                continue;
            }
            resources.push(resource_from_section(&name, &values, &default_lang_map)?);
        }

        debug!(resources = resources.len(), "parsed tx config");
        Ok(Self {
            resources,
            settings,
        })
    }

    /// All declared resources, in declaration order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Look up a resource by its (unscoped) slug.
    pub fn resource(&self, slug: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.resource_slug() == slug)
    }

    /// Like [`TxConfig::resource`], but missing resources are an error.
    pub fn require_resource(&self, slug: &str) -> ConfigResult<&Resource> {
        self.resource(slug)
            .ok_or_else(|| ConfigError::UnknownResource(slug.to_string()))
    }

    /// A `[main]` setting.
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }
}

type Section = (String, BTreeMap<String, String>);

fn parse_sections(text: &str) -> ConfigResult<Vec<Section>> {
    let mut sections: Vec<Section> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let name = rest.strip_suffix(']').ok_or_else(|| ConfigError::Malformed {
                line: idx + 1,
                reason: "unterminated section header".into(),
            })?;
            sections.push((name.trim().to_string(), BTreeMap::new()));
            continue;
        }

        let (key, value) = line.split_once('=').ok_or_else(|| ConfigError::Malformed {
            line: idx + 1,
            reason: format!("expected `key = value`, got {line:?}"),
        })?;
        let (_, values) = sections.last_mut().ok_or_else(|| ConfigError::Malformed {
            line: idx + 1,
            reason: "setting outside of any section".into(),
        })?;
        values.insert(key.trim().to_string(), value.trim().to_string());
    }

    Ok(sections)
}

fn resource_from_section(
    name: &str,
    values: &BTreeMap<String, String>,
    default_lang_map: &str,
) -> ConfigResult<Resource> {
    let (project, resource) = name
        .split_once('.')
        .filter(|(p, r)| !p.is_empty() && !r.is_empty())
        .ok_or_else(|| ConfigError::InvalidSection(name.to_string()))?;

    for key in REQUIRED_KEYS {
        if values.get(*key).map_or(true, |v| v.is_empty()) {
            return Err(ConfigError::MissingField {
                context: format!("section [{name}]"),
                field: (*key).to_string(),
            });
        }
    }

    let lang_map = values
        .get("lang_map")
        .map(String::as_str)
        .unwrap_or(default_lang_map);

    Ok(Resource::new(
        project,
        resource,
        &values["type"],
        &values["source_lang"],
        &values["source_file"],
        lang_map,
        &values["file_filter"],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# comment
[main]
host = https://www.transifex.com
lang_map = pt-BR:pt

[test-project.app]
source_file = config/locales/en.yml
source_lang = en
type = YAML
file_filter = config/locales/<lang>.yml

; another comment
[test-project.web]
source_file = web/en.json
source_lang = en
type = KEYVALUEJSON
file_filter = web/<lang>.json
lang_map = ko-KR:ko
";

    #[test]
    fn parses_resources_in_order() {
        let config = TxConfig::parse(SAMPLE).unwrap();
        let slugs: Vec<_> = config.resources().iter().map(|r| r.resource_slug()).collect();
        assert_eq!(slugs, vec!["app", "web"]);

        let app = config.resource("app").unwrap();
        assert_eq!(app.project_slug(), "test-project");
        assert_eq!(app.source_file(), "config/locales/en.yml");
        assert_eq!(app.resource_type(), "YAML");
        assert_eq!(app.translation_path("de"), "config/locales/de.yml");
    }

    #[test]
    fn main_settings_are_exposed() {
        let config = TxConfig::parse(SAMPLE).unwrap();
        assert_eq!(config.setting("host"), Some("https://www.transifex.com"));
        assert_eq!(config.setting("missing"), None);
    }

    #[test]
    fn lang_map_inherits_from_main() {
        let config = TxConfig::parse(SAMPLE).unwrap();
        assert_eq!(config.resource("app").unwrap().translation_path("pt-BR"), "config/locales/pt.yml");
        // An explicit map replaces the inherited one.
        assert_eq!(config.resource("web").unwrap().translation_path("pt-BR"), "web/pt-BR.json");
        assert_eq!(config.resource("web").unwrap().translation_path("ko-KR"), "web/ko.json");
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let text = "[p.r]\nsource_file = a.yml\nsource_lang = en\ntype = YAML\n";
        let err = TxConfig::parse(text).unwrap_err();
        assert!(
            matches!(&err, ConfigError::MissingField { field, .. } if field == "file_filter"),
            "got: {err}"
        );
    }

    #[test]
    fn section_without_dot_is_rejected() {
        let err = TxConfig::parse("[nodot]\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSection(_)));
    }

    #[test]
    fn setting_outside_section_is_rejected() {
        let err = TxConfig::parse("host = x\n").unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { line: 1, .. }));
    }

    #[test]
    fn require_resource_reports_unknown_slug() {
        let config = TxConfig::parse(SAMPLE).unwrap();
        assert!(config.require_resource("app").is_ok());
        assert!(matches!(
            config.require_resource("nope"),
            Err(ConfigError::UnknownResource(_))
        ));
    }
}
