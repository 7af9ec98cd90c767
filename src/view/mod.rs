//! Nested views: route entries, the navigation host and the view composer

pub mod composer;
pub mod route;

pub use composer::{compose, ComposedView, Selection, ViewComposer};
pub use route::{
    normalize_path, NavigationHost, RouteEntry, RouteMatch, RouteRegistry, RouteState,
};
