//! Theme module - theme values, the shared theme context and injection

pub mod context;
pub mod injector;
pub mod tree;
pub mod types;

// Public API re-exports
pub use context::{SubscriptionId, ThemeContext};
pub use injector::{with_theme, Themed};
pub use tree::{Theme, ThemeError};
pub use types::ThemeValue;
