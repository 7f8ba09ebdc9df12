//! The result of a settings lookup.

use super::SettingsNode;
use crate::error::{Result, SettingsError};
use crate::value::RawValue;
use std::sync::Arc;

/// A resolved key: either a nested section or a plain value.
#[derive(Debug, Clone)]
pub enum Setting {
    /// The key held a mapping; it is wrapped as a labeled section.
    Section(Arc<SettingsNode>),
    /// A scalar, sequence or null.
    Value(RawValue),
}

impl Setting {
    pub fn is_section(&self) -> bool {
        matches!(self, Setting::Section(_))
    }

    pub fn as_section(&self) -> Option<&SettingsNode> {
        match self {
            Setting::Section(node) => Some(node.as_ref()),
            Setting::Value(_) => None,
        }
    }

    pub fn into_section(self) -> Option<Arc<SettingsNode>> {
        match self {
            Setting::Section(node) => Some(node),
            Setting::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&RawValue> {
        match self {
            Setting::Section(_) => None,
            Setting::Value(value) => Some(value),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(RawValue::as_str)
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_value().and_then(RawValue::as_i64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_value().and_then(RawValue::as_f64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_value().and_then(RawValue::as_bool)
    }

    /// Chain a lookup into a section.
    ///
    /// A plain value has no keys, so this fails with `MissingSetting`.
    pub fn get(&self, key: &str) -> Result<Setting> {
        match self {
            Setting::Section(node) => node.get(key),
            Setting::Value(value) => Err(SettingsError::missing(
                key,
                &format!("{} value", value.kind()),
            )),
        }
    }

    /// The raw form: a section becomes its mapping again.
    pub fn to_raw(&self) -> RawValue {
        match self {
            Setting::Section(node) => RawValue::Mapping(node.as_mapping().clone()),
            Setting::Value(value) => value.clone(),
        }
    }
}

impl From<Setting> for RawValue {
    fn from(setting: Setting) -> Self {
        match setting {
            Setting::Section(node) => {
                RawValue::Mapping(Arc::unwrap_or_clone(node).into_mapping())
            }
            Setting::Value(value) => value,
        }
    }
}
