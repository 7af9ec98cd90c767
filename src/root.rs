//! RenderRoot - owner of a render tree's theme and navigation state
//!
//! The root is the only writer of the theme context. It listens for theme
//! switches and navigation so the host knows when to render again.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::component::{Component, Node, Props, RenderContext};
use crate::errors::RenderError;
use crate::theme::{SubscriptionId, Theme, ThemeContext};
use crate::view::NavigationHost;

/// Root of one component tree
pub struct RenderRoot<C: Component> {
    component: C,
    props: Props,
    base_path: String,
    themes: ThemeContext,
    navigation: Arc<NavigationHost>,
    dirty: Arc<AtomicBool>,
    subscription: SubscriptionId,
    mounted: bool,
}

impl<C: Component> RenderRoot<C> {
    pub fn new(component: C) -> Self {
        let themes = ThemeContext::new();
        let navigation = Arc::new(NavigationHost::new());
        let dirty = Arc::new(AtomicBool::new(true));

        let subscription = {
            let dirty = Arc::clone(&dirty);
            themes.subscribe(move |_| dirty.store(true, Ordering::SeqCst))
        };
        {
            let dirty = Arc::clone(&dirty);
            navigation.on_navigate(move |_| dirty.store(true, Ordering::SeqCst));
        }

        Self {
            component,
            props: Props::new(),
            base_path: String::from("/"),
            themes,
            navigation,
            dirty,
            subscription,
            mounted: false,
        }
    }

    /// Start with `theme` in the context
    pub fn with_theme(self, theme: Theme) -> Self {
        self.themes.set(theme);
        self
    }

    /// Props handed to the root component
    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    /// Base path of the root component
    pub fn with_base(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn themes(&self) -> &ThemeContext {
        &self.themes
    }

    pub fn navigation(&self) -> &Arc<NavigationHost> {
        &self.navigation
    }

    /// Context for the current location
    pub fn context(&self) -> RenderContext {
        RenderContext::new()
            .with_theme_context(self.themes.clone())
            .with_registry(self.navigation.clone())
            .with_base(self.base_path.clone())
            .at_path(self.navigation.current_path())
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Bring the tree onto the screen
    pub fn mount(&mut self) -> Result<(), RenderError> {
        if self.mounted {
            return Ok(());
        }
        self.component.mount(&self.context())?;
        self.mounted = true;
        self.dirty.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Remove the tree
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.component.unmount(&self.context());
        self.mounted = false;
    }

    /// Whether anything changed since the last render
    pub fn needs_render(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Render the tree
    pub fn render(&self) -> Result<Node, RenderError> {
        self.dirty.store(false, Ordering::SeqCst);
        self.component.render(&self.props, &self.context())
    }

    /// Render only if the theme, location or props changed
    pub fn render_if_needed(&self) -> Result<Option<Node>, RenderError> {
        if self.needs_render() {
            self.render().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Switch theme
    pub fn set_theme(&self, theme: Theme) {
        self.themes.set(theme);
    }

    pub fn clear_theme(&self) {
        self.themes.clear();
    }

    /// Move to `path`
    pub fn navigate(&self, path: impl Into<String>) {
        self.navigation.navigate(path);
    }

    /// Replace the root props
    pub fn set_props(&mut self, props: Props) {
        self.props = props;
        self.dirty.store(true, Ordering::SeqCst);
    }
}

impl<C: Component> Drop for RenderRoot<C> {
    fn drop(&mut self) {
        self.unmount();
        self.themes.unsubscribe(self.subscription);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::component_fn;
    use crate::theme::with_theme;
    use crate::view::{RouteRegistry, ViewComposer};
    use crate::widget::{create_widget, fallback, FailureSink, Phase, WidgetMap};

    struct Quiet;

    impl FailureSink for Quiet {
        fn report(&self, _component: &str, _phase: Phase, _error: &RenderError) {}
    }

    fn theme_name() -> impl Component {
        with_theme(component_fn(|props, _| {
            Ok(Node::text(
                props
                    .theme
                    .as_ref()
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|| "none".to_string()),
            ))
        }))
    }

    #[test]
    fn test_rerenders_on_theme_change() {
        let root = RenderRoot::new(theme_name()).with_theme(Theme::new("dark"));
        assert!(root.needs_render());
        assert_eq!(root.render_if_needed().unwrap(), Some(Node::text("dark")));
        assert_eq!(root.render_if_needed().unwrap(), None);

        root.set_theme(Theme::new("light"));
        assert!(root.needs_render());
        assert_eq!(root.render_if_needed().unwrap(), Some(Node::text("light")));

        root.clear_theme();
        assert_eq!(root.render().unwrap(), Node::text("none"));
    }

    #[test]
    fn test_navigation_switches_view() {
        let view = ViewComposer::new(Vec::new())
            .route("/cpu", component_fn(|_, _| Ok(Node::text("cpu"))))
            .route("/disk", component_fn(|_, _| Ok(Node::text("disk"))))
            .home(component_fn(|_, _| Ok(Node::text("home"))))
            .not_found(component_fn(|_, _| Ok(Node::text("404"))))
            .build();

        let mut root = RenderRoot::new(view);
        root.mount().unwrap();
        assert!(root.navigation().is_registered("/cpu"));
        assert_eq!(root.render().unwrap(), Node::text("home"));

        root.navigate("/disk");
        assert!(root.needs_render());
        assert_eq!(root.render().unwrap(), Node::text("disk"));

        root.navigate("/gpu");
        assert_eq!(root.render().unwrap(), Node::text("404"));

        root.unmount();
        assert!(root.navigation().registered_paths().is_empty());
    }

    #[test]
    fn test_dashboard_page() {
        let widgets = WidgetMap::new()
            .with(
                "status",
                create_widget(theme_name()).with_sink(Arc::new(Quiet)),
            )
            .with(
                "broken",
                create_widget(component_fn(|_, _| Err(RenderError::failed("offline"))))
                    .with_sink(Arc::new(Quiet)),
            );
        let view = ViewComposer::new(Vec::new())
            .route("/dashboard", widgets)
            .build();

        let mut root = RenderRoot::new(view)
            .with_theme(Theme::new("midnight"))
            .with_props(Props::new().with("host", "db1"));
        root.mount().unwrap();
        root.navigate("/dashboard");

        let out = root.render().unwrap();
        assert_eq!(out.text_content(), "midnight");
        assert!(out.to_string().contains(&fallback().to_string()));
    }

    #[test]
    fn test_set_props_marks_dirty() {
        let mut root = RenderRoot::new(component_fn(|props, _| {
            Ok(Node::text(props.get_str("label").unwrap_or("").to_string()))
        }));
        root.render().unwrap();
        assert!(!root.needs_render());

        root.set_props(Props::new().with("label", "net"));
        assert!(root.needs_render());
        assert_eq!(root.render().unwrap(), Node::text("net"));
    }

    #[test]
    fn test_drop_unmounts() {
        let navigation;
        {
            let view = ViewComposer::new(Vec::new())
                .route("/cpu", component_fn(|_, _| Ok(Node::Empty)))
                .build();
            let mut root = RenderRoot::new(view);
            root.mount().unwrap();
            root.mount().unwrap();
            assert!(root.is_mounted());
            navigation = Arc::clone(root.navigation());
            assert!(navigation.is_registered("/cpu"));
        }
        assert!(!navigation.is_registered("/cpu"));
    }

    struct NoDisk;

    impl Component for NoDisk {
        fn render(&self, _props: &Props, _ctx: &RenderContext) -> Result<Node, RenderError> {
            Ok(Node::Empty)
        }

        fn mount(&self, _ctx: &RenderContext) -> Result<(), RenderError> {
            Err(RenderError::failed("no disk"))
        }
    }

    #[test]
    fn test_failed_mount_leaves_nothing_registered() {
        let view = ViewComposer::new(Vec::new())
            .route("/cpu", component_fn(|_, _| Ok(Node::Empty)))
            .route("/disk", NoDisk)
            .build();

        let mut root = RenderRoot::new(view);
        assert!(root.mount().is_err());
        assert!(!root.is_mounted());
        assert!(root.navigation().registered_paths().is_empty());
    }

    #[test]
    fn test_base_path() {
        let view = ViewComposer::new(Vec::new())
            .home(component_fn(|_, _| Ok(Node::text("home"))))
            .build();
        let root = RenderRoot::new(view).with_base("/plugins/");
        root.navigate("/plugins");
        assert_eq!(root.render().unwrap(), Node::text("home"));
    }
}
