//! ThemeContext - the root-owned theme slot shared down a render tree
//!
//! Consumers only ever read the current theme. The render root replaces it
//! wholesale; every replacement bumps the generation and notifies
//! subscribers so the tree can re-render.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::theme::tree::Theme;

/// Identifies a change listener registered with [`ThemeContext::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(Option<&Arc<Theme>>) + Send + Sync>;

struct Slot {
    theme: Option<Arc<Theme>>,
    generation: u64,
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

/// Shared handle to the theme of one render tree
///
/// Cloning the handle shares the slot; it does not copy the theme.
#[derive(Clone)]
pub struct ThemeContext {
    slot: Arc<RwLock<Slot>>,
    listeners: Arc<Mutex<Listeners>>,
}

impl ThemeContext {
    /// Create a context with no theme
    pub fn new() -> Self {
        Self {
            slot: Arc::new(RwLock::new(Slot {
                theme: None,
                generation: 0,
            })),
            listeners: Arc::new(Mutex::new(Listeners::default())),
        }
    }

    /// Create a context holding `theme`
    pub fn with_theme(theme: Theme) -> Self {
        let ctx = Self::new();
        ctx.slot.write().theme = Some(Arc::new(theme));
        ctx
    }

    /// Current theme, if any
    pub fn current(&self) -> Option<Arc<Theme>> {
        self.slot.read().theme.clone()
    }

    /// Number of times the theme has been replaced
    pub fn generation(&self) -> u64 {
        self.slot.read().generation
    }

    /// Replace the theme and notify subscribers
    pub fn set(&self, theme: Theme) {
        crate::log!("Theme switched to '{}'", theme.name);
        self.replace(Some(Arc::new(theme)));
    }

    /// Remove the theme and notify subscribers
    pub fn clear(&self) {
        crate::log!("Theme cleared");
        self.replace(None);
    }

    fn replace(&self, theme: Option<Arc<Theme>>) {
        {
            let mut slot = self.slot.write();
            slot.theme = theme.clone();
            slot.generation += 1;
        }

        // Listeners may read the context, so neither lock is held while they run
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(theme.as_ref());
        }
    }

    /// Register a change listener
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(Option<&Arc<Theme>>) + Send + Sync + 'static,
    {
        let mut listeners = self.listeners.lock();
        let id = SubscriptionId(listeners.next_id);
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));
        id
    }

    /// Remove a change listener; returns false if it was not registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry, _)| *entry != id);
        listeners.entries.len() != before
    }

    /// Whether two handles share the same slot
    pub fn same_slot(&self, other: &ThemeContext) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.slot.read();
        f.debug_struct("ThemeContext")
            .field("theme", &slot.theme.as_ref().map(|t| t.name.as_str()))
            .field("generation", &slot.generation)
            .finish()
    }
}
