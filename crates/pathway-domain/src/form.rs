//! Field values collected by wizard steps.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metadata for a file picked by the user. Contents travel separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }
}

/// A single collected value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Records(Vec<FormValues>),
    File(SelectedFile),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// True for blank text and empty collections.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(value) => value.trim().is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Records(items) => items.is_empty(),
            FieldValue::File(_) => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<SelectedFile> for FieldValue {
    fn from(value: SelectedFile) -> Self {
        FieldValue::File(value)
    }
}

/// Field name to value mapping accumulated across wizard steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, FieldValue>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures and prompts.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    /// Text value for `key`, or an empty string when absent or not text.
    pub fn text(&self, key: &str) -> String {
        self.get(key)
            .and_then(FieldValue::as_text)
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Text value for `key` when present and not blank.
    pub fn opt_text(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(FieldValue::as_text)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    pub fn records(&self, key: &str) -> &[FormValues] {
        match self.get(key) {
            Some(FieldValue::Records(items)) => items,
            _ => &[],
        }
    }

    pub fn list(&self, key: &str) -> &[String] {
        match self.get(key) {
            Some(FieldValue::List(items)) => items,
            _ => &[],
        }
    }

    /// Overlays `other` on top of the current values; later values win.
    pub fn merge(&mut self, other: FormValues) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, FieldValue)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
