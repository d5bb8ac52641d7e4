//! Error types originating in the runtime itself.
//!
//! Failures raised by computations and handlers are user-defined and are
//! passed through untouched. The runtime only produces its own error when a
//! [`Strict`](crate::handler::Strict) handler meets a descriptor it cannot
//! resolve.

use thiserror::Error;

/// An effect was raised that no handler resolved.
///
/// # Examples
///
/// ```rust
/// use resumable::error::UnhandledEffectError;
///
/// let error = UnhandledEffectError::new("first_name_missing");
/// assert_eq!(error.to_string(), "unhandled effect: \"first_name_missing\"");
/// assert_eq!(error.into_tag(), "first_name_missing");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("unhandled effect: {tag:?}")]
pub struct UnhandledEffectError<T> {
    tag: T,
}

impl<T> UnhandledEffectError<T> {
    /// Creates an error for the effect tagged `tag`.
    #[must_use]
    pub const fn new(tag: T) -> Self {
        Self { tag }
    }

    /// Returns the tag of the unresolved effect.
    #[must_use]
    pub const fn tag(&self) -> &T {
        &self.tag
    }

    /// Consumes the error, returning the tag.
    #[must_use]
    pub fn into_tag(self) -> T {
        self.tag
    }
}
