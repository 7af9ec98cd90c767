//! Theme injection - supply the ambient theme to a component as a prop

use crate::component::{Component, Node, Props, RenderContext};
use crate::errors::RenderError;

/// A component that receives the current theme in `props.theme`
///
/// The theme is read from the render context on every render and never
/// cached, so a theme switch is visible on the next render. With no theme in
/// the context the wrapped component still renders, with `theme == None`.
pub struct Themed<C> {
    inner: C,
}

impl<C: Component> Themed<C> {
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

/// Wrap `component` so it receives the ambient theme
pub fn with_theme<C: Component>(component: C) -> Themed<C> {
    Themed { inner: component }
}

impl<C: Component> Component for Themed<C> {
    fn render(&self, props: &Props, ctx: &RenderContext) -> Result<Node, RenderError> {
        let mut themed = props.clone();
        themed.theme = ctx.theme();
        self.inner.render(&themed, ctx)
    }

    fn mount(&self, ctx: &RenderContext) -> Result<(), RenderError> {
        self.inner.mount(ctx)
    }

    fn unmount(&self, ctx: &RenderContext) {
        self.inner.unmount(ctx)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
