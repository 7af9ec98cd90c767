//! Rendering abstraction the kernel composes over
//!
//! A component is an opaque renderable: [`Props`] in, [`Node`] out. The
//! kernel never looks inside a component; it only wraps, selects and guards
//! them.
//!
//! Components take `&self` everywhere. Any per-instance state (such as a
//! fault boundary's failure flag) lives behind interior mutability, which
//! keeps components shareable as `Arc<dyn Component>`.

pub mod context;
pub mod node;
pub mod props;

use std::sync::Arc;

use crate::errors::RenderError;

pub use context::RenderContext;
pub use node::{Element, Node};
pub use props::Props;

/// A renderable unit
pub trait Component: Send + Sync {
    /// Produce output for the given props
    fn render(&self, props: &Props, ctx: &RenderContext) -> Result<Node, RenderError>;

    /// Called once when the component is brought onto the screen
    fn mount(&self, _ctx: &RenderContext) -> Result<(), RenderError> {
        Ok(())
    }

    /// Called once when the component is removed
    fn unmount(&self, _ctx: &RenderContext) {}

    /// Name used in log output
    fn name(&self) -> &str {
        "component"
    }
}

/// Shared, type-erased component
pub type SharedComponent = Arc<dyn Component>;

impl<C: Component + ?Sized> Component for Arc<C> {
    fn render(&self, props: &Props, ctx: &RenderContext) -> Result<Node, RenderError> {
        (**self).render(props, ctx)
    }

    fn mount(&self, ctx: &RenderContext) -> Result<(), RenderError> {
        (**self).mount(ctx)
    }

    fn unmount(&self, ctx: &RenderContext) {
        (**self).unmount(ctx)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<C: Component + ?Sized> Component for Box<C> {
    fn render(&self, props: &Props, ctx: &RenderContext) -> Result<Node, RenderError> {
        (**self).render(props, ctx)
    }

    fn mount(&self, ctx: &RenderContext) -> Result<(), RenderError> {
        (**self).mount(ctx)
    }

    fn unmount(&self, ctx: &RenderContext) {
        (**self).unmount(ctx)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Component backed by a render closure
pub struct FnComponent<F> {
    name: String,
    render: F,
}

impl<F> FnComponent<F>
where
    F: Fn(&Props, &RenderContext) -> Result<Node, RenderError> + Send + Sync,
{
    /// Name the component for log output
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<F> Component for FnComponent<F>
where
    F: Fn(&Props, &RenderContext) -> Result<Node, RenderError> + Send + Sync,
{
    fn render(&self, props: &Props, ctx: &RenderContext) -> Result<Node, RenderError> {
        (self.render)(props, ctx)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Turn a render closure into a component
pub fn component_fn<F>(render: F) -> FnComponent<F>
where
    F: Fn(&Props, &RenderContext) -> Result<Node, RenderError> + Send + Sync,
{
    FnComponent {
        name: String::from("fn"),
        render,
    }
}

/// Component that renders nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct Empty;

impl Component for Empty {
    fn render(&self, _props: &Props, _ctx: &RenderContext) -> Result<Node, RenderError> {
        Ok(Node::Empty)
    }

    fn name(&self) -> &str {
        "empty"
    }
}

/// Shared empty component, the default for optional views
pub fn empty() -> SharedComponent {
    Arc::new(Empty)
}
