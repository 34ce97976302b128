use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Value of a story flag. Unset keys read as `Bool(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Text(String),
}

impl FlagValue {
    pub fn is_truthy(&self) -> bool {
        match self {
            FlagValue::Bool(value) => *value,
            FlagValue::Text(value) => !value.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FlagValue::Text(value) => Some(value.as_str()),
            FlagValue::Bool(_) => None,
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Bool(value) => write!(f, "{value}"),
            FlagValue::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        FlagValue::Bool(value)
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        FlagValue::Text(value.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        FlagValue::Text(value)
    }
}

/// Persistent key/value store gating content and remembering story progress.
/// Reads never fail; last write wins.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct FlagStore {
    values: BTreeMap<String, FlagValue>,
}

impl FlagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<FlagValue>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> FlagValue {
        self.values
            .get(key)
            .cloned()
            .unwrap_or(FlagValue::Bool(false))
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_truthy()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FlagValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }
}
