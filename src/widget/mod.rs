//! Widget system: fault boundaries and the widget factory
//!
//! Widgets are components that host decorators embed side by side. A widget
//! that fails shows a small fallback element; its neighbours keep rendering.

pub mod boundary;
pub mod factory;

pub use boundary::{
    fallback, BoundaryState, FailureSink, FaultBoundary, Guarded, LogSink, Phase, FALLBACK_CLASS,
};
pub use factory::{create_widget, WidgetDescriptor, WidgetMap};
