//! Routes and the navigation host they register with

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::component::{Component, SharedComponent};

/// Normalize a path for comparison: trailing slashes removed, empty becomes `/`
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        String::from("/")
    } else {
        trimmed.to_string()
    }
}

/// Where the render currently is
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteState {
    /// Full path being rendered
    pub current_path: String,
    /// Path the enclosing composed view is mounted at
    pub base_path: String,
}

impl Default for RouteState {
    fn default() -> Self {
        Self {
            current_path: String::from("/"),
            base_path: String::from("/"),
        }
    }
}

impl RouteState {
    /// Whether the current path is the base path itself
    pub fn is_at_base(&self) -> bool {
        normalize_path(&self.current_path) == normalize_path(&self.base_path)
    }
}

/// Match information handed to a routed component in `props.route`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
    /// The route path that matched
    pub path: String,
    /// Base path of the composed view that selected it
    pub base_path: String,
}

/// A path and the component rendered for it
#[derive(Clone)]
pub struct RouteEntry {
    pub path: String,
    pub component: SharedComponent,
}

impl RouteEntry {
    pub fn new<C: Component + 'static>(path: impl Into<String>, component: C) -> Self {
        Self {
            path: path.into(),
            component: Arc::new(component),
        }
    }

    pub fn shared(path: impl Into<String>, component: SharedComponent) -> Self {
        Self {
            path: path.into(),
            component,
        }
    }
}

impl std::fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteEntry")
            .field("path", &self.path)
            .field("component", &self.component.name())
            .finish()
    }
}

/// Host-side route bookkeeping
pub trait RouteRegistry: Send + Sync {
    /// Record that a mounted view serves `path`
    fn register(&self, path: &str);

    /// Drop one registration of `path`
    fn deregister(&self, path: &str);

    /// Whether any mounted view currently serves `path`
    fn is_registered(&self, path: &str) -> bool;
}

type NavigationListener = Arc<dyn Fn(&str) + Send + Sync>;

/// In-process routing host: current location plus registered routes
///
/// Registrations are reference counted so two mounted views serving the same
/// path do not unregister each other.
pub struct NavigationHost {
    current: RwLock<String>,
    registered: Mutex<BTreeMap<String, usize>>,
    listeners: Mutex<Vec<NavigationListener>>,
}

impl NavigationHost {
    pub fn new() -> Self {
        Self::at("/")
    }

    /// Host starting at `path`
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            current: RwLock::new(path.into()),
            registered: Mutex::new(BTreeMap::new()),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn current_path(&self) -> String {
        self.current.read().clone()
    }

    /// Move to `path` and notify listeners
    pub fn navigate(&self, path: impl Into<String>) {
        let path = path.into();
        crate::log!("Navigate: {}", path);
        *self.current.write() = path.clone();

        let listeners: Vec<NavigationListener> =
            self.listeners.lock().iter().map(Arc::clone).collect();
        for listener in listeners {
            listener(&path);
        }
    }

    /// Register a navigation listener
    pub fn on_navigate<F>(&self, listener: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.listeners.lock().push(Arc::new(listener));
    }

    /// All registered paths, sorted
    pub fn registered_paths(&self) -> Vec<String> {
        self.registered.lock().keys().cloned().collect()
    }
}

impl Default for NavigationHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteRegistry for NavigationHost {
    fn register(&self, path: &str) {
        crate::log!("Route registered: {}", path);
        *self.registered.lock().entry(path.to_string()).or_insert(0) += 1;
    }

    fn deregister(&self, path: &str) {
        let mut registered = self.registered.lock();
        if let Some(count) = registered.get_mut(path) {
            *count -= 1;
            if *count == 0 {
                registered.remove(path);
                crate::log!("Route deregistered: {}", path);
            }
        }
    }

    fn is_registered(&self, path: &str) -> bool {
        self.registered.lock().contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/plugins/"), "/plugins");
        assert_eq!(normalize_path("/plugins//"), "/plugins");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/a/b"), "/a/b");
    }

    #[test]
    fn test_is_at_base() {
        let state = RouteState {
            current_path: "/plugins/".to_string(),
            base_path: "/plugins".to_string(),
        };
        assert!(state.is_at_base());

        let state = RouteState {
            current_path: "/plugins/cpu".to_string(),
            base_path: "/plugins".to_string(),
        };
        assert!(!state.is_at_base());
    }

    #[test]
    fn test_registration_is_counted() {
        let host = NavigationHost::new();
        host.register("/a");
        host.register("/a");
        host.register("/b");
        assert_eq!(host.registered_paths(), vec!["/a", "/b"]);

        host.deregister("/a");
        assert!(host.is_registered("/a"));
        host.deregister("/a");
        assert!(!host.is_registered("/a"));

        // Unknown paths are ignored
        host.deregister("/zzz");
        assert_eq!(host.registered_paths(), vec!["/b"]);
    }

    #[test]
    fn test_navigate_notifies() {
        let host = NavigationHost::at("/start");
        let calls = Arc::new(AtomicUsize::new(0));
        {
            let calls = Arc::clone(&calls);
            host.on_navigate(move |path| {
                assert_eq!(path, "/next");
                calls.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert_eq!(host.current_path(), "/start");
        host.navigate("/next");
        assert_eq!(host.current_path(), "/next");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
