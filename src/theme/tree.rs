//! Theme document: a named, nested mapping of style variables

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::theme::types::ThemeValue;

/// Error types for theme loading
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A complete theme as supplied by the theme source
///
/// Variable names are free-form. Nested groups are addressed with dotted
/// paths, e.g. `palette.primary`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme name
    pub name: String,
    /// Style variables
    pub variables: BTreeMap<String, ThemeValue>,
}

impl Theme {
    /// Create an empty theme
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: BTreeMap::new(),
        }
    }

    /// Builder-style variable setter
    pub fn with(mut self, path: &str, value: impl Into<ThemeValue>) -> Self {
        self.set(path, value);
        self
    }

    /// Parse a theme from a TOML document
    ///
    /// A top-level string `name` names the theme; every other key becomes a
    /// variable.
    pub fn parse_toml(input: &str) -> Result<Self, ThemeError> {
        let mut variables: BTreeMap<String, ThemeValue> = toml::from_str(input)?;
        let name = match variables.remove("name") {
            Some(ThemeValue::String(name)) => name,
            Some(other) => {
                variables.insert("name".to_string(), other);
                String::from("default")
            }
            None => String::from("default"),
        };
        Ok(Self { name, variables })
    }

    /// Load a theme from a TOML file
    pub fn load(path: &Path) -> Result<Self, ThemeError> {
        let content = fs::read_to_string(path)?;
        let theme = Self::parse_toml(&content)?;
        crate::log!("Loaded theme '{}' from {}", theme.name, path.display());
        Ok(theme)
    }

    /// Set a variable, creating intermediate groups for dotted paths
    pub fn set(&mut self, path: &str, value: impl Into<ThemeValue>) {
        let mut segments: Vec<&str> = path.split('.').collect();
        let Some(leaf) = segments.pop() else {
            return;
        };

        let mut map = &mut self.variables;
        for segment in segments {
            let entry = map
                .entry(segment.to_string())
                .or_insert_with(|| ThemeValue::Group(BTreeMap::new()));
            if !matches!(entry, ThemeValue::Group(_)) {
                *entry = ThemeValue::Group(BTreeMap::new());
            }
            map = match entry {
                ThemeValue::Group(group) => group,
                _ => return,
            };
        }
        map.insert(leaf.to_string(), value.into());
    }

    /// Look up a variable by dotted path
    pub fn get(&self, path: &str) -> Option<&ThemeValue> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut value = self.variables.get(first)?;
        for segment in segments {
            value = value.as_group()?.get(segment)?;
        }
        Some(value)
    }

    /// Get a number variable with default
    pub fn get_number(&self, path: &str, default: f64) -> f64 {
        self.get(path)
            .and_then(ThemeValue::as_number)
            .unwrap_or(default)
    }

    /// Get a string variable with default
    pub fn get_string(&self, path: &str, default: &str) -> String {
        self.get(path)
            .and_then(ThemeValue::as_str)
            .unwrap_or(default)
            .to_string()
    }
}
