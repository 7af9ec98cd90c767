//! ViewComposer - nested sub-views from a declarative route list
//!
//! A composed view picks what to render from the current path:
//!
//! 1. at its own base path it renders `home`
//! 2. on an exact route path it renders that route's component
//! 3. anywhere else it renders `not_found`
//!
//! Paths are compared literally. There is no prefix matching and no
//! placeholder syntax. With duplicate paths the first entry wins.

use std::collections::HashSet;
use std::sync::Arc;

use crate::component::{empty, Component, Node, Props, RenderContext, SharedComponent};
use crate::errors::{ComposeError, RenderError};
use crate::view::route::{RouteEntry, RouteMatch};

/// Builder for a [`ComposedView`]
pub struct ViewComposer {
    routes: Vec<RouteEntry>,
    home: Option<SharedComponent>,
    not_found: Option<SharedComponent>,
}

impl ViewComposer {
    pub fn new(routes: impl IntoIterator<Item = RouteEntry>) -> Self {
        Self {
            routes: routes.into_iter().collect(),
            home: None,
            not_found: None,
        }
    }

    /// Add one more route
    pub fn route<C: Component + 'static>(mut self, path: impl Into<String>, component: C) -> Self {
        self.routes.push(RouteEntry::new(path, component));
        self
    }

    /// View rendered at the base path
    pub fn home<C: Component + 'static>(mut self, component: C) -> Self {
        let component: SharedComponent = Arc::new(component);
        self.home = Some(component);
        self
    }

    /// View rendered when nothing matches
    pub fn not_found<C: Component + 'static>(mut self, component: C) -> Self {
        let component: SharedComponent = Arc::new(component);
        self.not_found = Some(component);
        self
    }

    pub fn build(self) -> ComposedView {
        compose(self.routes, self.home, self.not_found)
    }
}

/// Compose routes and optional fallbacks into one component
///
/// Missing `home` / `not_found` render nothing.
pub fn compose(
    routes: Vec<RouteEntry>,
    home: Option<SharedComponent>,
    not_found: Option<SharedComponent>,
) -> ComposedView {
    let view = ComposedView {
        routes,
        home: home.unwrap_or_else(empty),
        not_found: not_found.unwrap_or_else(empty),
    };

    if let Err(err) = view.validate() {
        crate::log!("ViewComposer: {} (first entry wins)", err);
    }
    view
}

/// Which branch a composed view selects for a given context
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Home,
    Route(usize),
    NotFound,
}

/// Router-like component produced by [`compose`]
pub struct ComposedView {
    routes: Vec<RouteEntry>,
    home: SharedComponent,
    not_found: SharedComponent,
}

impl ComposedView {
    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    /// Check for duplicate or relative route paths
    pub fn validate(&self) -> Result<(), ComposeError> {
        let mut seen = HashSet::new();
        for entry in &self.routes {
            if !entry.path.starts_with('/') {
                return Err(ComposeError::RelativePath(entry.path.clone()));
            }
            if !seen.insert(entry.path.as_str()) {
                return Err(ComposeError::DuplicatePath(entry.path.clone()));
            }
        }
        Ok(())
    }

    /// Decide what to render without rendering it
    pub fn select(&self, ctx: &RenderContext) -> Selection {
        let route = ctx.route();
        if route.is_at_base() {
            return Selection::Home;
        }

        self.routes
            .iter()
            .position(|entry| entry.path == route.current_path)
            .map(Selection::Route)
            .unwrap_or(Selection::NotFound)
    }

    /// Distinct route paths in declaration order
    fn distinct_paths(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.routes
            .iter()
            .map(|entry| entry.path.as_str())
            .filter(|path| seen.insert(*path))
            .collect()
    }

    fn deregister(&self, ctx: &RenderContext) {
        if let Some(registry) = ctx.registry() {
            for path in self.distinct_paths() {
                registry.deregister(path);
            }
        }
    }

    /// Every child paired with the context it renders under
    fn children(&self, ctx: &RenderContext) -> Vec<(&SharedComponent, RenderContext)> {
        let mut children = vec![(&self.home, ctx.clone()), (&self.not_found, ctx.clone())];
        children.extend(
            self.routes
                .iter()
                .map(|entry| (&entry.component, ctx.nested(&entry.path))),
        );
        children
    }
}

impl Component for ComposedView {
    fn render(&self, props: &Props, ctx: &RenderContext) -> Result<Node, RenderError> {
        match self.select(ctx) {
            Selection::Home => self.home.render(props, ctx),
            Selection::NotFound => self.not_found.render(props, ctx),
            Selection::Route(index) => {
                let entry = &self.routes[index];
                let mut routed = props.clone();
                routed.route = Some(RouteMatch {
                    path: entry.path.clone(),
                    base_path: ctx.route().base_path.clone(),
                });
                entry.component.render(&routed, &ctx.nested(&entry.path))
            }
        }
    }

    fn mount(&self, ctx: &RenderContext) -> Result<(), RenderError> {
        if let Some(registry) = ctx.registry() {
            for path in self.distinct_paths() {
                registry.register(path);
            }
        }

        let children = self.children(ctx);
        for (index, (child, child_ctx)) in children.iter().enumerate() {
            if let Err(err) = child.mount(child_ctx) {
                // Roll back: nothing of this view stays mounted or registered
                for (mounted, mounted_ctx) in children[..index].iter().rev() {
                    mounted.unmount(mounted_ctx);
                }
                self.deregister(ctx);
                return Err(err);
            }
        }
        Ok(())
    }

    fn unmount(&self, ctx: &RenderContext) {
        for (child, child_ctx) in self.children(ctx) {
            child.unmount(&child_ctx);
        }
        self.deregister(ctx);
    }

    fn name(&self) -> &str {
        "composed-view"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::component_fn;
    use crate::view::route::{NavigationHost, RouteRegistry};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn label(text: &'static str) -> impl Component {
        component_fn(move |_, _| Ok(Node::text(text)))
    }

    fn plugin_view() -> ComposedView {
        ViewComposer::new(vec![
            RouteEntry::new("/plugins/cpu", label("cpu")),
            RouteEntry::new("/plugins/memory", label("memory")),
            RouteEntry::new("/plugins/disk", label("disk")),
        ])
        .home(label("home"))
        .not_found(label("missing"))
        .build()
    }

    fn at(path: &str) -> RenderContext {
        RenderContext::new().with_base("/plugins").at_path(path)
    }

    #[test]
    fn test_exact_route_renders_only_its_component() {
        let view = plugin_view();
        for name in ["cpu", "memory", "disk"] {
            let out = view
                .render(&Props::new(), &at(&format!("/plugins/{name}")))
                .unwrap();
            assert_eq!(out, Node::text(name));
        }
    }

    #[test]
    fn test_home_at_base_path() {
        let view = plugin_view();
        assert_eq!(view.render(&Props::new(), &at("/plugins")).unwrap(), Node::text("home"));
        assert_eq!(view.render(&Props::new(), &at("/plugins/")).unwrap(), Node::text("home"));
    }

    #[test]
    fn test_not_found_for_unknown_path() {
        let view = plugin_view();
        for path in ["/plugins/gpu", "/plugins/cpu/", "/plugins/cpu/detail", "/other"] {
            assert_eq!(
                view.render(&Props::new(), &at(path)).unwrap(),
                Node::text("missing"),
                "path {path}"
            );
        }
    }

    #[test]
    fn test_defaults_render_empty() {
        let view = compose(Vec::new(), None, None);
        assert_eq!(view.render(&Props::new(), &at("/plugins")).unwrap(), Node::Empty);
        assert_eq!(view.render(&Props::new(), &at("/plugins/x")).unwrap(), Node::Empty);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let view = ViewComposer::new(Vec::new())
            .route("/plugins/cpu", label("first"))
            .route("/plugins/cpu", label("second"))
            .build();

        assert_eq!(view.select(&at("/plugins/cpu")), Selection::Route(0));
        assert_eq!(view.render(&Props::new(), &at("/plugins/cpu")).unwrap(), Node::text("first"));
        assert_eq!(
            view.validate(),
            Err(ComposeError::DuplicatePath("/plugins/cpu".to_string()))
        );
    }

    #[test]
    fn test_validate_relative_path() {
        let view = ViewComposer::new(Vec::new()).route("cpu", label("cpu")).build();
        assert_eq!(view.validate(), Err(ComposeError::RelativePath("cpu".to_string())));
        assert!(plugin_view().validate().is_ok());
    }

    #[test]
    fn test_route_props_merged() {
        let view = ViewComposer::new(Vec::new())
            .route(
                "/plugins/cpu",
                component_fn(|props, ctx| {
                    let route = props.route.as_ref().ok_or(RenderError::MissingProp("route".into()))?;
                    Ok(Node::text(format!(
                        "{} {} {} {}",
                        props.require_str("host")?,
                        route.path,
                        route.base_path,
                        ctx.route().base_path
                    )))
                }),
            )
            .build();

        let out = view
            .render(&Props::new().with("host", "db1"), &at("/plugins/cpu"))
            .unwrap();
        assert_eq!(out, Node::text("db1 /plugins/cpu /plugins /plugins/cpu"));
    }

    #[test]
    fn test_nested_views_compose() {
        let inner = Arc::new(
            ViewComposer::new(Vec::new())
                .route("/plugins/cpu/cores", label("cores"))
                .home(label("cpu overview"))
                .not_found(label("cpu missing"))
                .build(),
        );
        let outer = ViewComposer::new(Vec::new())
            .route("/plugins/cpu", Arc::clone(&inner))
            .route("/plugins/cpu/cores", label("outer cores"))
            .build();

        assert_eq!(
            outer.render(&Props::new(), &at("/plugins/cpu")).unwrap(),
            Node::text("cpu overview")
        );
        // Exact matching: the outer view never hands a deeper path to the inner one
        assert_eq!(
            outer.render(&Props::new(), &at("/plugins/cpu/cores")).unwrap(),
            Node::text("outer cores")
        );
        assert_eq!(
            inner
                .render(&Props::new(), &at("/plugins/cpu/cores").nested("/plugins/cpu"))
                .unwrap(),
            Node::text("cores")
        );
    }

    #[test]
    fn test_child_errors_propagate() {
        let view = ViewComposer::new(Vec::new())
            .route("/plugins/bad", component_fn(|_, _| Err(RenderError::failed("broken"))))
            .build();
        assert_eq!(
            view.render(&Props::new(), &at("/plugins/bad")),
            Err(RenderError::failed("broken"))
        );
    }

    #[test]
    fn test_mount_registers_and_unmount_deregisters() {
        let host = Arc::new(NavigationHost::new());
        let ctx = at("/plugins").with_registry(host.clone());
        let view = ViewComposer::new(Vec::new())
            .route("/plugins/cpu", label("a"))
            .route("/plugins/cpu", label("b"))
            .route("/plugins/disk", label("c"))
            .build();

        view.mount(&ctx).unwrap();
        assert_eq!(host.registered_paths(), vec!["/plugins/cpu", "/plugins/disk"]);

        view.unmount(&ctx);
        assert!(host.registered_paths().is_empty());
        assert!(!host.is_registered("/plugins/cpu"));
    }

    struct Lifecycle {
        mounts: Arc<AtomicUsize>,
        unmounts: Arc<AtomicUsize>,
    }

    impl Component for Lifecycle {
        fn render(&self, _props: &Props, _ctx: &RenderContext) -> Result<Node, RenderError> {
            Ok(Node::Empty)
        }

        fn mount(&self, _ctx: &RenderContext) -> Result<(), RenderError> {
            self.mounts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn unmount(&self, _ctx: &RenderContext) {
            self.unmounts.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_lifecycle_forwarded_to_children() {
        let mounts = Arc::new(AtomicUsize::new(0));
        let unmounts = Arc::new(AtomicUsize::new(0));
        let child = || Lifecycle {
            mounts: Arc::clone(&mounts),
            unmounts: Arc::clone(&unmounts),
        };

        let view = ViewComposer::new(Vec::new())
            .route("/plugins/a", child())
            .route("/plugins/b", child())
            .home(child())
            .build();

        let ctx = at("/plugins");
        view.mount(&ctx).unwrap();
        assert_eq!(mounts.load(Ordering::SeqCst), 3);
        view.unmount(&ctx);
        assert_eq!(unmounts.load(Ordering::SeqCst), 3);
    }

    struct BadMount;

    impl Component for BadMount {
        fn render(&self, _props: &Props, _ctx: &RenderContext) -> Result<Node, RenderError> {
            Ok(Node::Empty)
        }

        fn mount(&self, _ctx: &RenderContext) -> Result<(), RenderError> {
            Err(RenderError::failed("no source"))
        }
    }

    #[test]
    fn test_failed_mount_rolls_back() {
        let host = Arc::new(NavigationHost::new());
        let ctx = at("/plugins").with_registry(host.clone());
        let mounts = Arc::new(AtomicUsize::new(0));
        let unmounts = Arc::new(AtomicUsize::new(0));

        let view = ViewComposer::new(Vec::new())
            .route(
                "/plugins/a",
                Lifecycle {
                    mounts: Arc::clone(&mounts),
                    unmounts: Arc::clone(&unmounts),
                },
            )
            .route("/plugins/b", BadMount)
            .home(Lifecycle {
                mounts: Arc::clone(&mounts),
                unmounts: Arc::clone(&unmounts),
            })
            .build();

        assert_eq!(view.mount(&ctx), Err(RenderError::failed("no source")));
        assert!(host.registered_paths().is_empty());
        assert_eq!(mounts.load(Ordering::SeqCst), 2);
        assert_eq!(unmounts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_registry_trait_object() {
        let seen = Arc::new(Mutex::new(Vec::new()));

        struct Recorder(Arc<Mutex<Vec<String>>>);
        impl RouteRegistry for Recorder {
            fn register(&self, path: &str) {
                self.0.lock().push(format!("+{path}"));
            }
            fn deregister(&self, path: &str) {
                self.0.lock().push(format!("-{path}"));
            }
            fn is_registered(&self, _path: &str) -> bool {
                false
            }
        }

        let ctx = at("/plugins").with_registry(Arc::new(Recorder(Arc::clone(&seen))));
        let view = plugin_view();
        view.mount(&ctx).unwrap();
        view.unmount(&ctx);

        assert_eq!(
            *seen.lock(),
            vec![
                "+/plugins/cpu",
                "+/plugins/memory",
                "+/plugins/disk",
                "-/plugins/cpu",
                "-/plugins/memory",
                "-/plugins/disk"
            ]
        );
    }
}
