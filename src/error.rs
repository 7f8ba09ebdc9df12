//! Error types for yamlsettings.
//!
//! Uses thiserror for derive macros. Lookup failures carry the section label
//! so a missing key can be located without a backtrace.

use crate::exit_codes;
use crate::template::TemplateError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for settings loading and lookup.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// No source was configured at all.
    #[error("no file specified as settings source")]
    MissingSource,

    /// None of the candidate sources existed or parsed into a non-empty mapping.
    #[error("no correct settings in any of files [{}]", .sources.join(", "))]
    InvalidSettingsSource {
        /// Every path that was attempted, in merge order.
        sources: Vec<String>,
    },

    /// A key was requested that does not exist in the section.
    #[error("Missing setting '{key}' in {section}")]
    MissingSetting {
        /// The key that was looked up.
        key: String,
        /// Display label of the section the lookup ran against.
        section: String,
    },

    /// A file could not be read.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document text could not be parsed into a mapping.
    #[error("failed to parse settings document: {0}")]
    Parse(String),

    /// Document templating failed before parsing.
    #[error("failed to expand settings template: {0}")]
    Template(#[from] TemplateError),

    /// A section could not be deserialized into the requested type.
    #[error("failed to deserialize {section}: {message}")]
    Deserialize { section: String, message: String },

    /// Invalid arguments or usage.
    #[error("{0}")]
    UserError(String),
}

impl SettingsError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SettingsError::MissingSetting { .. } => exit_codes::MISSING_SETTING,
            SettingsError::MissingSource
            | SettingsError::InvalidSettingsSource { .. }
            | SettingsError::Io { .. }
            | SettingsError::Parse(_)
            | SettingsError::Template(_)
            | SettingsError::Deserialize { .. } => exit_codes::SOURCE_FAILURE,
            SettingsError::UserError(_) => exit_codes::USER_ERROR,
        }
    }

    pub(crate) fn missing(key: &str, section: &str) -> Self {
        SettingsError::MissingSetting {
            key: key.to_string(),
            section: section.to_string(),
        }
    }
}

/// Result type alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_setting_has_correct_exit_code() {
        let err = SettingsError::missing("port", "'db' section in app.yml");
        assert_eq!(err.exit_code(), exit_codes::MISSING_SETTING);
    }

    #[test]
    fn source_errors_have_correct_exit_code() {
        assert_eq!(
            SettingsError::MissingSource.exit_code(),
            exit_codes::SOURCE_FAILURE
        );
        let err = SettingsError::InvalidSettingsSource {
            sources: vec!["a.yml".to_string()],
        };
        assert_eq!(err.exit_code(), exit_codes::SOURCE_FAILURE);
    }

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = SettingsError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = SettingsError::missing("bar", "'foo' section in settings.yml");
        assert_eq!(
            err.to_string(),
            "Missing setting 'bar' in 'foo' section in settings.yml"
        );

        let err = SettingsError::InvalidSettingsSource {
            sources: vec!["a.yml".to_string(), "b.yml".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "no correct settings in any of files [a.yml, b.yml]"
        );
    }
}
