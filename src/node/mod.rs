//! Labeled settings sections with lazy sub-section wrapping.
//!
//! A [`SettingsNode`] owns a [`RawMapping`] and a display label. Looking up a
//! key whose value is itself a mapping returns a child node labeled
//! `'<key>' section in <parent label>`; that child is built on first access
//! and reused afterwards. Scalars and sequences are returned as values.

mod setting;


pub use setting::Setting;

use crate::error::{Result, SettingsError};
use crate::loader::{LoadOptions, Loader, SourceSpec};
use crate::merge::deep_merge;
use crate::value::{NULL, RawMapping, RawValue};
use regex::Regex;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::ops::Index;
use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Keys eligible for accessor-style shorthand.
static ACCESSOR_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+$").expect("Invalid accessor key regex"));

/// Whether `key` is identifier-shaped (`^\w+$`).
///
/// Other keys (`some-setting`, `a.b`) are still stored and reachable through
/// [`SettingsNode::get`]; they are only excluded from shorthand accessors.
pub fn is_accessor_key(key: &str) -> bool {
    ACCESSOR_KEY_REGEX.is_match(key)
}

/// A settings section: a mapping plus the label used in error messages.
#[derive(Debug)]
pub struct SettingsNode {
    data: RawMapping,
    label: String,
    sections: RwLock<HashMap<String, Arc<SettingsNode>>>,
}

impl SettingsNode {
    /// Wrap `data` as a section labeled `label`.
    pub fn new(data: RawMapping, label: impl Into<String>) -> Self {
        Self {
            data,
            label: label.into(),
            sections: RwLock::new(HashMap::new()),
        }
    }

    /// Load `source` with the default YAML parser and wrap it as a root node.
    ///
    /// The node is labeled with the source's display form.
    pub fn load(
        source: &SourceSpec,
        namespace: Option<&str>,
        options: &LoadOptions,
    ) -> Result<Self> {
        Self::load_with(&Loader::default(), source, namespace, options)
    }

    /// Same as [`SettingsNode::load`] with an explicit loader.
    pub fn load_with(
        loader: &Loader,
        source: &SourceSpec,
        namespace: Option<&str>,
        options: &LoadOptions,
    ) -> Result<Self> {
        let data = loader.load(source, namespace, options)?;
        Ok(Self::new(data, source.describe()))
    }

    /// Load `source` into this node.
    ///
    /// With `replace_mode` the loaded mapping replaces the current contents;
    /// otherwise it is deep-merged over them. The label becomes the source's
    /// display form and previously wrapped sections are discarded.
    pub fn load_source(
        &mut self,
        source: &SourceSpec,
        namespace: Option<&str>,
        options: &LoadOptions,
    ) -> Result<()> {
        let loaded = Loader::default().load(source, namespace, options)?;
        if options.replace_mode {
            self.data = loaded;
        } else {
            deep_merge(&mut self.data, loaded);
        }
        self.label = source.describe();
        self.sections
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(())
    }

    /// Display label, e.g. `'db' section in config/app.yml`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Look up `key`.
    ///
    /// # Errors
    ///
    /// * `MissingSetting` - `key` is not present in this section
    pub fn get(&self, key: &str) -> Result<Setting> {
        self.try_get(key)
            .ok_or_else(|| SettingsError::missing(key, &self.label))
    }

    /// Look up `key`, returning `None` when it is absent.
    pub fn try_get(&self, key: &str) -> Option<Setting> {
        if let Some(section) = self.sections().get(key) {
            return Some(Setting::Section(Arc::clone(section)));
        }

        match self.data.get(key)? {
            RawValue::Mapping(map) => {
                let child = SettingsNode::new(
                    map.clone(),
                    format!("'{}' section in {}", key, self.label),
                );
                let section = Arc::clone(
                    self.sections_mut()
                        .entry(key.to_string())
                        .or_insert_with(|| Arc::new(child)),
                );
                Some(Setting::Section(section))
            }
            value => Some(Setting::Value(value.clone())),
        }
    }

    /// Look up a dotted path such as `db.primary.host`.
    ///
    /// Every segment but the last must resolve to a section.
    ///
    /// # Errors
    ///
    /// * `MissingSetting` - from the first segment that could not be resolved
    pub fn get_by_path(&self, path: &str) -> Result<Setting> {
        let mut segments = path.split('.');
        let first = segments.next().unwrap_or_default();
        let mut current = self.get(first)?;
        let mut previous = first;
        let mut enclosing = self.label.clone();

        for segment in segments {
            current = match current {
                Setting::Section(node) => {
                    let next = node.get(segment)?;
                    enclosing = node.label().to_string();
                    next
                }
                Setting::Value(value) => {
                    return Err(SettingsError::missing(
                        segment,
                        &format!("'{}' {} value in {}", previous, value.kind(), enclosing),
                    ));
                }
            };
            previous = segment;
        }

        Ok(current)
    }

    /// Deserialize the value at a dotted path into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        match self.get_by_path(path)? {
            Setting::Section(node) => node.extract(),
            Setting::Value(value) => {
                deserialize(value, || format!("'{}' in {}", path, self.label))
            }
        }
    }

    /// Deserialize this whole section into `T`.
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T> {
        deserialize(RawValue::Mapping(self.data.clone()), || self.label.clone())
    }

    /// Store `value` under `key`.
    ///
    /// A mapping value is wrapped right away into a section that keeps this
    /// node's label, and later lookups of `key` return that section.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        let key = key.into();
        let value = value.into();
        let sections = self
            .sections
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        match &value {
            RawValue::Mapping(map) => {
                let child = SettingsNode::new(map.clone(), self.label.clone());
                sections.insert(key.clone(), Arc::new(child));
            }
            _ => {
                sections.remove(&key);
            }
        }
        self.data.insert(key, value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// All keys in this section, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// Keys eligible for accessor-style shorthand.
    pub fn accessor_keys(&self) -> impl Iterator<Item = &str> {
        self.keys().filter(|key| is_accessor_key(key))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The underlying mapping.
    pub fn as_mapping(&self) -> &RawMapping {
        &self.data
    }

    pub fn into_mapping(self) -> RawMapping {
        self.data
    }

    fn sections(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<SettingsNode>>> {
        self.sections.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn sections_mut(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<SettingsNode>>> {
        self.sections.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clone for SettingsNode {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            label: self.label.clone(),
            sections: RwLock::new(self.sections().clone()),
        }
    }
}

/// Non-failing read: absent keys yield `RawValue::Null`.
impl Index<&str> for SettingsNode {
    type Output = RawValue;

    fn index(&self, key: &str) -> &RawValue {
        self.data.get(key).unwrap_or(&NULL)
    }
}

fn deserialize<T, F>(value: RawValue, section: F) -> Result<T>
where
    T: DeserializeOwned,
    F: FnOnce() -> String,
{
    serde_yaml::from_value(serde_yaml::Value::from(value)).map_err(|e| {
        SettingsError::Deserialize {
            section: section(),
            message: e.to_string(),
        }
    })
}
