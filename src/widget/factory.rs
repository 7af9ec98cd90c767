//! Widget factory - fault-isolated components with one calling convention
//!
//! Hosts aggregate widgets into maps and invoke each of them the same way:
//! `widget.render(&props, &ctx)` returns a node and never fails.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::component::{Component, Node, Props, RenderContext, SharedComponent};
use crate::errors::RenderError;
use crate::widget::boundary::{FailureSink, FaultBoundary, Guarded, LogSink};

/// A ready-to-embed widget
///
/// Descriptors are immutable and cheap to clone. Every call to
/// [`WidgetDescriptor::render`] runs behind a fresh boundary, so calls share
/// no mutable state.
#[derive(Clone)]
pub struct WidgetDescriptor {
    component: SharedComponent,
    sink: Arc<dyn FailureSink>,
}

/// Build a widget from a component
pub fn create_widget<C: Component + 'static>(component: C) -> WidgetDescriptor {
    WidgetDescriptor {
        component: Arc::new(component),
        sink: Arc::new(LogSink),
    }
}

impl WidgetDescriptor {
    /// Route failure reports to `sink`
    pub fn with_sink(mut self, sink: Arc<dyn FailureSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn name(&self) -> &str {
        self.component.name()
    }

    /// Render once; failures become the fallback element
    pub fn render(&self, props: &Props, ctx: &RenderContext) -> Node {
        self.instantiate().render_node(props, ctx)
    }

    /// A stateful guarded instance for hosts that keep the widget mounted
    pub fn instantiate(&self) -> Guarded<SharedComponent> {
        FaultBoundary::wrap(Arc::clone(&self.component)).with_sink(Arc::clone(&self.sink))
    }
}

impl Component for WidgetDescriptor {
    fn render(&self, props: &Props, ctx: &RenderContext) -> Result<Node, RenderError> {
        Ok(WidgetDescriptor::render(self, props, ctx))
    }

    fn name(&self) -> &str {
        self.component.name()
    }
}

impl std::fmt::Debug for WidgetDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetDescriptor")
            .field("component", &self.component.name())
            .finish()
    }
}

/// Named widgets in insertion order, as a host decorator collects them
///
/// While mounted, each widget renders through a guard created at mount time,
/// so a widget that failed keeps showing the fallback until the map is
/// unmounted. An unmounted map renders every widget behind a fresh guard.
#[derive(Default)]
pub struct WidgetMap {
    widgets: Vec<(String, WidgetDescriptor)>,
    mounted: Mutex<Option<Vec<(String, Guarded<SharedComponent>)>>>,
}

impl Clone for WidgetMap {
    /// The clone starts unmounted
    fn clone(&self) -> Self {
        Self {
            widgets: self.widgets.clone(),
            mounted: Mutex::new(None),
        }
    }
}

impl std::fmt::Debug for WidgetMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetMap")
            .field("widgets", &self.widgets)
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

impl WidgetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a widget; replacing keeps the original position
    pub fn insert(&mut self, name: impl Into<String>, widget: WidgetDescriptor) {
        let name = name.into();
        self.forget_guard(&name);
        match self.widgets.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = widget,
            None => self.widgets.push((name, widget)),
        }
    }

    /// Builder-style [`WidgetMap::insert`]
    pub fn with(mut self, name: impl Into<String>, widget: WidgetDescriptor) -> Self {
        self.insert(name, widget);
        self
    }

    pub fn get(&self, name: &str) -> Option<&WidgetDescriptor> {
        self.widgets
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, widget)| widget)
    }

    pub fn remove(&mut self, name: &str) -> Option<WidgetDescriptor> {
        let index = self.widgets.iter().position(|(existing, _)| existing == name)?;
        self.forget_guard(name);
        Some(self.widgets.remove(index).1)
    }

    // A replaced or removed widget no longer renders through its old guard
    fn forget_guard(&mut self, name: &str) {
        if let Some(guards) = self.mounted.get_mut() {
            guards.retain(|(existing, _)| existing != name);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.lock().is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.widgets.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Invoke every widget with the same props
    pub fn render_all(&self, props: &Props, ctx: &RenderContext) -> Vec<(String, Node)> {
        let mounted = self.mounted.lock();
        self.widgets
            .iter()
            .map(|(name, widget)| {
                let guard = mounted
                    .as_ref()
                    .and_then(|guards| guards.iter().find(|(existing, _)| existing == name));
                let node = match guard {
                    Some((_, guard)) => guard.render_node(props, ctx),
                    None => widget.render(props, ctx),
                };
                (name.clone(), node)
            })
            .collect()
    }
}

impl Component for WidgetMap {
    /// Each widget in a `section` tagged with its name
    fn render(&self, props: &Props, ctx: &RenderContext) -> Result<Node, RenderError> {
        let sections = self.render_all(props, ctx).into_iter().map(|(name, node)| {
            Node::element("section")
                .attr("data-widget", name)
                .child(node)
        });
        Ok(Node::element("div")
            .attr("class", "widgets")
            .children(sections)
            .into())
    }

    fn mount(&self, ctx: &RenderContext) -> Result<(), RenderError> {
        let mut mounted = self.mounted.lock();
        if mounted.is_some() {
            return Ok(());
        }

        let mut guards = Vec::with_capacity(self.widgets.len());
        for (name, widget) in &self.widgets {
            let guard = widget.instantiate();
            // Guards absorb mount failures
            guard.mount(ctx)?;
            guards.push((name.clone(), guard));
        }
        *mounted = Some(guards);
        Ok(())
    }

    fn unmount(&self, ctx: &RenderContext) {
        let guards = self.mounted.lock().take();
        for (_, guard) in guards.into_iter().flatten().rev() {
            guard.unmount(ctx);
        }
    }

    fn name(&self) -> &str {
        "widget-map"
    }
}
