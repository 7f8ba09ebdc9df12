//! Document parsing.
//!
//! The loader only needs "text in, mapping out"; [`DocumentParser`] is that
//! seam. [`YamlParser`] is the default: environment templating followed by
//! YAML parsing.

use crate::error::{Result, SettingsError};
use crate::template::expand_env;
use crate::value::{RawMapping, RawValue};

/// Turns document source text into a [`RawMapping`].
pub trait DocumentParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<RawMapping>;
}

/// YAML documents, optionally templated with `${VAR}` references.
///
/// Merge keys (`<<: *defaults`) are resolved after parsing.
///
/// With templating on, `$$` anywhere in the text becomes `$`, quoted values
/// included. A literal `$$` (e.g. in a password) must be written `$$$$`, or
/// templating turned off.
#[derive(Debug, Clone, Copy)]
pub struct YamlParser {
    /// Expand `${VAR}` references before parsing.
    pub expand_templates: bool,
}

impl Default for YamlParser {
    fn default() -> Self {
        Self {
            expand_templates: true,
        }
    }
}

impl DocumentParser for YamlParser {
    fn parse(&self, text: &str) -> Result<RawMapping> {
        let expanded;
        let source = if self.expand_templates {
            expanded = expand_env(text)?;
            expanded.as_str()
        } else {
            text
        };

        let mut value: serde_yaml::Value = serde_yaml::from_str(source)
            .map_err(|e| SettingsError::Parse(format!("invalid YAML: {}", e)))?;
        value
            .apply_merge()
            .map_err(|e| SettingsError::Parse(format!("invalid merge key: {}", e)))?;

        match RawValue::from(value) {
            RawValue::Mapping(map) => Ok(map),
            other => Err(SettingsError::Parse(format!(
                "document root must be a mapping, found {}",
                other.kind()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn parses_mapping_document() {
        let map = YamlParser::default()
            .parse("db:\n  host: localhost\n  port: 5432\n")
            .unwrap();
        let db = map["db"].as_mapping().unwrap();
        assert_eq!(db["host"].as_str(), Some("localhost"));
        assert_eq!(db["port"].as_i64(), Some(5432));
    }

    #[test]
    fn rejects_non_mapping_root() {
        let err = YamlParser::default().parse("- a\n- b\n").unwrap_err();
        assert!(err.to_string().contains("found sequence"));

        let err = YamlParser::default().parse("just text").unwrap_err();
        assert!(err.to_string().contains("found string"));
    }

    #[test]
    fn rejects_empty_document() {
        let err = YamlParser::default().parse("").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn rejects_invalid_yaml() {
        let err = YamlParser::default().parse("a: [1, 2\nb: }").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    #[serial]
    fn expands_environment_before_parsing() {
        // SAFETY: serialized with every other test that touches the environment.
        unsafe { std::env::set_var("YAMLSETTINGS_TEST_PORT", "6543") };
        let map = YamlParser::default()
            .parse("port: ${YAMLSETTINGS_TEST_PORT}\n")
            .unwrap();
        unsafe { std::env::remove_var("YAMLSETTINGS_TEST_PORT") };

        assert_eq!(map["port"].as_i64(), Some(6543));
    }

    #[test]
    fn undefined_variable_is_template_error() {
        let err = YamlParser::default()
            .parse("port: ${YAMLSETTINGS_SURELY_UNDEFINED_VAR}\n")
            .unwrap_err();
        assert!(matches!(err, SettingsError::Template(_)));
    }

    #[test]
    fn resolves_merge_keys() {
        let map = YamlParser::default()
            .parse("base: &base\n  a: 1\n  b: 2\nchild:\n  <<: *base\n  b: 3\n")
            .unwrap();
        let child = map["child"].as_mapping().unwrap();
        assert_eq!(child.len(), 2);
        assert_eq!(child["a"].as_i64(), Some(1));
        assert_eq!(child["b"].as_i64(), Some(3));
    }

    #[test]
    fn double_dollar_is_an_escape_when_templating() {
        let map = YamlParser::default()
            .parse("one: a$$b\ntwo: a$$$$b\n")
            .unwrap();
        assert_eq!(map["one"].as_str(), Some("a$b"));
        assert_eq!(map["two"].as_str(), Some("a$$b"));

        let raw = YamlParser {
            expand_templates: false,
        }
        .parse("one: a$$b\n")
        .unwrap();
        assert_eq!(raw["one"].as_str(), Some("a$$b"));
    }

    #[test]
    fn templating_can_be_disabled() {
        let parser = YamlParser {
            expand_templates: false,
        };
        let map = parser.parse("cmd: echo ${HOME}\n").unwrap();
        assert_eq!(map["cmd"].as_str(), Some("echo ${HOME}"));
    }
}
