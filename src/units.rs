//! Unit scale - themed spacing and sizing tokens from plain magnitudes
//!
//! `to_scaled_unit(2.0)` with the default scale is `"2rem"`. The process-wide
//! scale is installed once at startup from configuration; everything here is
//! otherwise pure.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Default font size base
pub const DEFAULT_BASE: f64 = 1.0;
/// Default unit suffix
pub const DEFAULT_UNIT: &str = "rem";

static CURRENT: RwLock<Option<UnitScale>> = parking_lot::const_rwlock(None);

/// Base multiplier plus unit suffix
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitScale {
    #[serde(default = "default_base", rename = "font_size_base")]
    pub base: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_base() -> f64 {
    DEFAULT_BASE
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

impl Default for UnitScale {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE,
            unit: default_unit(),
        }
    }
}

impl UnitScale {
    pub fn new(base: f64, unit: impl Into<String>) -> Self {
        Self {
            base,
            unit: unit.into(),
        }
    }

    /// The process-wide scale
    pub fn current() -> Self {
        CURRENT.read().clone().unwrap_or_default()
    }

    /// Replace the process-wide scale
    pub fn install(scale: UnitScale) {
        crate::log!("Unit scale: base={} unit={}", scale.base, scale.unit);
        *CURRENT.write() = Some(scale);
    }

    /// `size` times this scale's base, with the unit suffix
    pub fn scaled(&self, size: f64) -> String {
        self.scaled_with(size, self.base)
    }

    /// `size` times an explicit base, with this scale's unit suffix
    pub fn scaled_with(&self, size: f64, base: f64) -> String {
        format!("{}{}", size * base, self.unit)
    }

    /// Style map for the sides named in `spec`
    pub fn gutter(&self, property: GutterProperty, spec: &GutterSpec) -> BTreeMap<String, String> {
        let prefix = property.as_str();
        [
            ("Left", spec.left.or(spec.horizontal).or(spec.all)),
            ("Right", spec.right.or(spec.horizontal).or(spec.all)),
            ("Top", spec.top.or(spec.vertical).or(spec.all)),
            ("Bottom", spec.bottom.or(spec.vertical).or(spec.all)),
        ]
        .into_iter()
        .filter_map(|(side, size)| size.map(|size| (format!("{prefix}{side}"), self.scaled(size))))
        .collect()
    }
}

/// Which box property a gutter applies to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GutterProperty {
    Padding,
    Margin,
}

impl GutterProperty {
    pub fn as_str(&self) -> &'static str {
        match self {
            GutterProperty::Padding => "padding",
            GutterProperty::Margin => "margin",
        }
    }
}

/// Gutter sizes by side
///
/// Per side, an explicit value beats `horizontal`/`vertical`, which beat
/// `all`. Sides that resolve to nothing are left out of the result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GutterSpec {
    #[serde(default)]
    pub left: Option<f64>,
    #[serde(default)]
    pub right: Option<f64>,
    #[serde(default)]
    pub top: Option<f64>,
    #[serde(default)]
    pub bottom: Option<f64>,
    #[serde(default)]
    pub horizontal: Option<f64>,
    #[serde(default)]
    pub vertical: Option<f64>,
    #[serde(default)]
    pub all: Option<f64>,
}

impl GutterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(size: f64) -> Self {
        Self {
            all: Some(size),
            ..Self::default()
        }
    }

    pub fn symmetric(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal: Some(horizontal),
            vertical: Some(vertical),
            ..Self::default()
        }
    }

    pub fn left(mut self, size: f64) -> Self {
        self.left = Some(size);
        self
    }

    pub fn right(mut self, size: f64) -> Self {
        self.right = Some(size);
        self
    }

    pub fn top(mut self, size: f64) -> Self {
        self.top = Some(size);
        self
    }

    pub fn bottom(mut self, size: f64) -> Self {
        self.bottom = Some(size);
        self
    }

    pub fn horizontal(mut self, size: f64) -> Self {
        self.horizontal = Some(size);
        self
    }

    pub fn vertical(mut self, size: f64) -> Self {
        self.vertical = Some(size);
        self
    }
}

/// `size` on the process-wide scale, e.g. `"5rem"`
pub fn to_scaled_unit(size: f64) -> String {
    UnitScale::current().scaled(size)
}

/// `size * base` with the process-wide unit suffix
pub fn to_scaled_unit_with(size: f64, base: f64) -> String {
    UnitScale::current().scaled_with(size, base)
}

/// Gutter style map on the process-wide scale
pub fn to_gutter_style(property: GutterProperty, spec: &GutterSpec) -> BTreeMap<String, String> {
    UnitScale::current().gutter(property, spec)
}
