//! RenderContext - ambient values threaded down the render tree

use std::sync::Arc;

use crate::theme::{Theme, ThemeContext};
use crate::view::{normalize_path, RouteRegistry, RouteState};

/// Everything a component can read without it being passed as a prop
#[derive(Clone)]
pub struct RenderContext {
    theme: ThemeContext,
    route: RouteState,
    registry: Option<Arc<dyn RouteRegistry>>,
}

impl RenderContext {
    /// Context with no theme, at `/` with base `/`, and no route registry
    pub fn new() -> Self {
        Self {
            theme: ThemeContext::new(),
            route: RouteState::default(),
            registry: None,
        }
    }

    pub fn with_theme_context(mut self, theme: ThemeContext) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_registry(mut self, registry: Arc<dyn RouteRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Set the current path
    pub fn at_path(mut self, path: impl Into<String>) -> Self {
        self.route.current_path = path.into();
        self
    }

    /// Set the base path
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.route.base_path = base.into();
        self
    }

    /// Child context rooted at `base_path`
    pub fn nested(&self, base_path: &str) -> Self {
        let mut child = self.clone();
        child.route.base_path = normalize_path(base_path);
        child
    }

    /// Theme as of this call
    pub fn theme(&self) -> Option<Arc<Theme>> {
        self.theme.current()
    }

    pub fn theme_context(&self) -> &ThemeContext {
        &self.theme
    }

    pub fn route(&self) -> &RouteState {
        &self.route
    }

    pub fn registry(&self) -> Option<&Arc<dyn RouteRegistry>> {
        self.registry.as_ref()
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("theme", &self.theme)
            .field("route", &self.route)
            .field("registry", &self.registry.is_some())
            .finish()
    }
}
