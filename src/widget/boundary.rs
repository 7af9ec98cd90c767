//! FaultBoundary - contain a failing subtree behind a fallback element
//!
//! A guarded component starts `Healthy`. The first failure while mounting or
//! rendering (an `Err` or a panic) is reported to the failure sink and moves
//! the guard to `Failed`. From then on the fallback is rendered without
//! touching the wrapped component. Only `unmount` resets the guard, which
//! corresponds to the owner discarding this mounted instance.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::component::{Component, Node, Props, RenderContext};
use crate::errors::RenderError;

/// CSS class carried by the fallback element
pub const FALLBACK_CLASS: &str = "fault-boundary";

/// The fixed element shown in place of a failed subtree
pub fn fallback() -> Node {
    Node::element("div")
        .attr("class", FALLBACK_CLASS)
        .attr("role", "alert")
        .into()
}

/// Lifecycle step during which a failure was caught
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Mount,
    Render,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Mount => f.write_str("mount"),
            Phase::Render => f.write_str("render"),
        }
    }
}

/// Receives a description of every failure a boundary catches
pub trait FailureSink: Send + Sync {
    fn report(&self, component: &str, phase: Phase, error: &RenderError);
}

/// Default sink: writes failures to the crate log
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl FailureSink for LogSink {
    fn report(&self, component: &str, phase: Phase, error: &RenderError) {
        crate::log!("FaultBoundary: '{}' failed during {}: {}", component, phase, error);
    }
}

/// Boundary state
#[derive(Clone, Debug, PartialEq)]
pub enum BoundaryState {
    Healthy,
    Failed(RenderError),
}

struct Inner {
    state: BoundaryState,
    mounted: bool,
}

/// Entry point for wrapping components
pub struct FaultBoundary;

impl FaultBoundary {
    /// Guard `component`, reporting failures to the log
    pub fn wrap<C: Component>(component: C) -> Guarded<C> {
        Guarded {
            component,
            inner: Mutex::new(Inner {
                state: BoundaryState::Healthy,
                mounted: false,
            }),
            sink: Arc::new(LogSink),
        }
    }
}

/// A component whose failures stop at this boundary
pub struct Guarded<C> {
    component: C,
    inner: Mutex<Inner>,
    sink: Arc<dyn FailureSink>,
}

fn catch<T>(f: impl FnOnce() -> Result<T, RenderError>) -> Result<T, RenderError> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(RenderError::from_panic(payload)),
    }
}

impl<C: Component> Guarded<C> {
    /// Route failure reports to `sink`
    pub fn with_sink(mut self, sink: Arc<dyn FailureSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn state(&self) -> BoundaryState {
        self.inner.lock().state.clone()
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.inner.lock().state, BoundaryState::Failed(_))
    }

    /// The failure that tripped this boundary
    pub fn failure(&self) -> Option<RenderError> {
        match &self.inner.lock().state {
            BoundaryState::Failed(err) => Some(err.clone()),
            BoundaryState::Healthy => None,
        }
    }

    pub fn inner(&self) -> &C {
        &self.component
    }

    /// Render, substituting the fallback for any failure
    pub fn render_node(&self, props: &Props, ctx: &RenderContext) -> Node {
        if self.is_failed() {
            return fallback();
        }

        match catch(|| self.component.render(props, ctx)) {
            Ok(node) => node,
            Err(err) => {
                self.trip(Phase::Render, err, ctx);
                fallback()
            }
        }
    }

    fn trip(&self, phase: Phase, err: RenderError, ctx: &RenderContext) {
        self.sink.report(self.component.name(), phase, &err);

        let was_mounted = {
            let mut inner = self.inner.lock();
            inner.state = BoundaryState::Failed(err);
            std::mem::replace(&mut inner.mounted, false)
        };

        // The failed subtree leaves the screen now
        if was_mounted {
            let _ = catch(|| {
                self.component.unmount(ctx);
                Ok(())
            });
        }
    }
}

impl<C: Component> Component for Guarded<C> {
    fn render(&self, props: &Props, ctx: &RenderContext) -> Result<Node, RenderError> {
        Ok(self.render_node(props, ctx))
    }

    fn mount(&self, ctx: &RenderContext) -> Result<(), RenderError> {
        if self.is_failed() {
            return Ok(());
        }

        match catch(|| self.component.mount(ctx)) {
            Ok(()) => self.inner.lock().mounted = true,
            Err(err) => self.trip(Phase::Mount, err, ctx),
        }
        Ok(())
    }

    fn unmount(&self, ctx: &RenderContext) {
        let was_mounted = {
            let mut inner = self.inner.lock();
            inner.state = BoundaryState::Healthy;
            std::mem::replace(&mut inner.mounted, false)
        };

        if was_mounted {
            if let Err(err) = catch(|| {
                self.component.unmount(ctx);
                Ok(())
            }) {
                crate::log!("FaultBoundary: '{}' failed during unmount: {}", self.component.name(), err);
            }
        }
    }

    fn name(&self) -> &str {
        self.component.name()
    }
}
