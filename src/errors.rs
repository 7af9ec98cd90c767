//! Error types for rendering and composition
//!
//! Rendering failures are recovered by the nearest fault boundary; everything
//! else is reported to the caller.

use thiserror::Error;

/// A failure raised while producing output for a component subtree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The component reported a failure
    #[error("Render failed: {0}")]
    Failed(String),

    /// The component panicked while rendering or mounting
    #[error("Component panicked: {0}")]
    Panicked(String),

    /// A required prop was not supplied
    #[error("Missing prop: {0}")]
    MissingProp(String),

    /// A prop was supplied with an unusable value
    #[error("Invalid prop `{name}`: {reason}")]
    InvalidProp { name: String, reason: String },
}

impl RenderError {
    /// Shorthand for [`RenderError::Failed`]
    pub fn failed(message: impl Into<String>) -> Self {
        RenderError::Failed(message.into())
    }

    /// Build a [`RenderError::Panicked`] from a panic payload
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        RenderError::Panicked(message)
    }
}

/// Misconfiguration of a composed view
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// The same path was supplied for more than one route
    #[error("Duplicate route path: {0}")]
    DuplicatePath(String),

    /// A route path was not absolute
    #[error("Route path must start with '/': {0}")]
    RelativePath(String),
}
