use std::fmt;

use crate::error::{FormatError, FormatResult};

/// On-disk format of a localization document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Resolve the format from a resource's declared type.
    ///
    /// Matching is case-insensitive: any type mentioning `YAML` or `YML`
    /// (`YAML`, `YML`, `YAML_GENERIC`) is YAML; `JSON`, `KEYVALUEJSON` and
    /// `CHROME` are JSON.
    pub fn from_resource_type(resource_type: &str) -> FormatResult<Self> {
        let upper = resource_type.trim().to_ascii_uppercase();
        if upper.contains("YAML") || upper.contains("YML") {
            return Ok(Format::Yaml);
        }
        match upper.as_str() {
            "JSON" | "KEYVALUEJSON" | "CHROME" => Ok(Format::Json),
            _ => Err(FormatError::UnsupportedType(resource_type.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Yaml => f.write_str("yaml"),
            Format::Json => f.write_str("json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_types() {
        for ty in ["YAML", "yml", "YAML_GENERIC", "yaml_generic"] {
            assert_eq!(Format::from_resource_type(ty).unwrap(), Format::Yaml, "{ty}");
        }
    }

    #[test]
    fn json_types() {
        for ty in ["JSON", "KEYVALUEJSON", "keyvaluejson", "CHROME"] {
            assert_eq!(Format::from_resource_type(ty).unwrap(), Format::Json, "{ty}");
        }
    }

    #[test]
    fn unknown_type_rejected() {
        let err = Format::from_resource_type("PO").unwrap_err();
        assert!(matches!(err, FormatError::UnsupportedType(t) if t == "PO"));
    }
}
