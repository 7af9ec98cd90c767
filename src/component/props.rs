//! Props - the single canonical input record for every component

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::errors::RenderError;
use crate::theme::Theme;
use crate::view::RouteMatch;

/// Input passed to a component's render
///
/// Free-form values live in `values`. The theme and route match are typed
/// slots filled in by the theme injector and the view composer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props {
    pub values: Map<String, Value>,
    pub theme: Option<Arc<Theme>>,
    pub route: Option<RouteMatch>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build props from a JSON object; non-object values yield empty props
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(values) => Self {
                values,
                ..Self::default()
            },
            _ => Self::default(),
        }
    }

    /// Builder-style value setter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    /// Get a value or fail with [`RenderError::MissingProp`]
    pub fn require(&self, key: &str) -> Result<&Value, RenderError> {
        self.values
            .get(key)
            .ok_or_else(|| RenderError::MissingProp(key.to_string()))
    }

    /// Get a string value or fail
    pub fn require_str(&self, key: &str) -> Result<&str, RenderError> {
        self.require(key)?
            .as_str()
            .ok_or_else(|| RenderError::InvalidProp {
                name: key.to_string(),
                reason: "expected a string".to_string(),
            })
    }

    /// Get a numeric value or fail
    pub fn require_f64(&self, key: &str) -> Result<f64, RenderError> {
        self.require(key)?
            .as_f64()
            .ok_or_else(|| RenderError::InvalidProp {
                name: key.to_string(),
                reason: "expected a number".to_string(),
            })
    }

    /// Overlay `other` onto these props; `other` wins on conflicts
    pub fn merged(&self, other: &Props) -> Props {
        let mut merged = self.clone();
        for (key, value) in &other.values {
            merged.values.insert(key.clone(), value.clone());
        }
        if other.theme.is_some() {
            merged.theme = other.theme.clone();
        }
        if other.route.is_some() {
            merged.route = other.route.clone();
        }
        merged
    }
}
