//! Dashkit - UI composition kernel for dashboard plugins
//!
//! Plugin authors use four composition utilities and two unit helpers:
//!
//! - [`theme::with_theme`] hands the ambient theme to a component as a prop
//! - [`view::ViewComposer`] builds nested sub-views from a list of routes
//! - [`widget::FaultBoundary`] keeps a failing subtree from taking down its
//!   neighbours
//! - [`widget::create_widget`] wraps a component in a boundary with a single
//!   calling convention
//! - [`units::to_scaled_unit`] and [`units::to_gutter_style`] derive spacing
//!   tokens from the configured base scale
//!
//! The [`component`] module is the thin rendering abstraction these compose
//! over, and [`root::RenderRoot`] ties a component tree to its theme and
//! navigation state.

// Include the log module first so the log! macro works everywhere
#[macro_use]
pub mod log;

pub mod component;
pub mod config;
pub mod errors;
pub mod root;
pub mod theme;
pub mod units;
pub mod view;
pub mod widget;

pub use component::{component_fn, empty, Component, Node, Props, RenderContext};
pub use config::{ConfigError, KitConfig};
pub use errors::{ComposeError, RenderError};
pub use root::RenderRoot;
pub use theme::{with_theme, Theme, ThemeContext};
pub use units::{to_gutter_style, to_scaled_unit, to_scaled_unit_with, GutterProperty, GutterSpec};
pub use view::{compose, RouteEntry, ViewComposer};
pub use widget::{create_widget, FaultBoundary, WidgetDescriptor, WidgetMap};
