//! Raw settings data model.
//!
//! A `RawMapping` is what a parsed document looks like before any lookup
//! wrapping: string keys mapping to scalars, sequences or nested mappings.
//! Keys are kept in a `BTreeMap` so iteration and dumps are deterministic.

use serde::Serialize;
use std::collections::BTreeMap;

/// A parsed hierarchical document keyed by string.
pub type RawMapping = BTreeMap<String, RawValue>;

/// A single value inside a [`RawMapping`].
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum RawValue {
    #[default]
    Null,
    Bool(bool),
    Number(serde_yaml::Number),
    String(String),
    Sequence(Vec<RawValue>),
    Mapping(RawMapping),
}

pub(crate) static NULL: RawValue = RawValue::Null;

impl RawValue {
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, RawValue::Mapping(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RawValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RawValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[RawValue]> {
        match self {
            RawValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&RawMapping> {
        match self {
            RawValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Short type name used in diagnostics and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            RawValue::Null => "null",
            RawValue::Bool(_) => "bool",
            RawValue::Number(_) => "number",
            RawValue::String(_) => "string",
            RawValue::Sequence(_) => "sequence",
            RawValue::Mapping(_) => "mapping",
        }
    }
}

impl From<serde_yaml::Value> for RawValue {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(b),
            Value::Number(n) => RawValue::Number(n),
            Value::String(s) => RawValue::String(s),
            Value::Sequence(items) => {
                RawValue::Sequence(items.into_iter().map(RawValue::from).collect())
            }
            Value::Mapping(map) => RawValue::Mapping(
                map.into_iter()
                    .map(|(k, v)| (key_to_string(k), RawValue::from(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => RawValue::from(tagged.value),
        }
    }
}

impl From<RawValue> for serde_yaml::Value {
    fn from(value: RawValue) -> Self {
        use serde_yaml::Value;

        match value {
            RawValue::Null => Value::Null,
            RawValue::Bool(b) => Value::Bool(b),
            RawValue::Number(n) => Value::Number(n),
            RawValue::String(s) => Value::String(s),
            RawValue::Sequence(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            RawValue::Mapping(map) => Value::Mapping(
                map.into_iter()
                    .map(|(k, v)| (Value::String(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Non-string YAML keys (numbers, bools, `~`) are stored by their text form.
fn key_to_string(key: serde_yaml::Value) -> String {
    use serde_yaml::Value;

    match key {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "~".to_string(),
        Value::Tagged(tagged) => key_to_string(tagged.value),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{:?}", other)),
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::String(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::String(s)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(n.into())
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n.into())
    }
}

impl From<Vec<RawValue>> for RawValue {
    fn from(items: Vec<RawValue>) -> Self {
        RawValue::Sequence(items)
    }
}

impl From<RawMapping> for RawValue {
    fn from(map: RawMapping) -> Self {
        RawValue::Mapping(map)
    }
}

/// Build a [`RawMapping`] from key-value pairs.
pub fn mapping<I, K, V>(pairs: I) -> RawMapping
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<RawValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_nested_yaml() {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str("a:\n  b: 1\n  c: [x, true, ~]\nd: 2.5\n").unwrap();
        let RawValue::Mapping(map) = RawValue::from(yaml) else {
            panic!("expected mapping");
        };

        let a = map["a"].as_mapping().unwrap();
        assert_eq!(a["b"].as_i64(), Some(1));
        let c = a["c"].as_sequence().unwrap();
        assert_eq!(c[0].as_str(), Some("x"));
        assert_eq!(c[1].as_bool(), Some(true));
        assert!(c[2].is_null());
        assert_eq!(map["d"].as_f64(), Some(2.5));
    }

    #[test]
    fn stringifies_non_string_keys() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("1: one\ntrue: yes-ish\n").unwrap();
        let RawValue::Mapping(map) = RawValue::from(yaml) else {
            panic!("expected mapping");
        };

        assert_eq!(map["1"].as_str(), Some("one"));
        assert_eq!(map["true"].as_str(), Some("yes-ish"));
    }

    #[test]
    fn unwraps_tagged_values() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("port: !custom 8080\n").unwrap();
        let RawValue::Mapping(map) = RawValue::from(yaml) else {
            panic!("expected mapping");
        };
        assert_eq!(map["port"].as_i64(), Some(8080));
    }

    #[test]
    fn serializes_back_to_yaml() {
        let map = mapping([("name", RawValue::from("app")), ("debug", false.into())]);
        let text = serde_yaml::to_string(&RawValue::Mapping(map)).unwrap();
        assert!(text.contains("name: app"));
        assert!(text.contains("debug: false"));
    }
}
