//! Theme value type

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single style variable in a theme
///
/// Themes are opaque to the kernel; this is only enough structure to carry
/// nested mappings of names to values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeValue {
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<ThemeValue>),
    Group(BTreeMap<String, ThemeValue>),
}

impl ThemeValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ThemeValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ThemeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ThemeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&BTreeMap<String, ThemeValue>> {
        match self {
            ThemeValue::Group(g) => Some(g),
            _ => None,
        }
    }
}

impl From<f64> for ThemeValue {
    fn from(n: f64) -> Self {
        ThemeValue::Number(n)
    }
}

impl From<bool> for ThemeValue {
    fn from(b: bool) -> Self {
        ThemeValue::Bool(b)
    }
}

impl From<&str> for ThemeValue {
    fn from(s: &str) -> Self {
        ThemeValue::String(s.to_string())
    }
}

impl From<String> for ThemeValue {
    fn from(s: String) -> Self {
        ThemeValue::String(s)
    }
}
