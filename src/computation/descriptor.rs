//! Effect descriptors and step results.
//!
//! A [`Descriptor`] is the value a computation suspends with: a tag that
//! handlers are keyed on, plus optional payload values carrying context
//! from the suspension point. A [`Step`] is the outcome of driving a
//! computation once.
//!
//! # Examples
//!
//! ```rust
//! use resumable::computation::Descriptor;
//!
//! let bare: Descriptor<&str, String> = Descriptor::bare("first_name_missing");
//! assert!(bare.is_bare());
//!
//! let with_payload = Descriptor::bare("format_name").with("mac".to_string());
//! assert_eq!(with_payload.tag(), &"format_name");
//! assert_eq!(with_payload.payload(), ["mac".to_string()]);
//! ```

use smallvec::SmallVec;

const PAYLOAD_INLINE_CAPACITY: usize = 2;

/// Payload storage of a descriptor.
///
/// Most effects carry zero to two payload values, which are stored inline.
pub type Payload<V> = SmallVec<[V; PAYLOAD_INLINE_CAPACITY]>;

/// The value a computation suspends with.
///
/// The tag is the key used for handler lookup. Payload values, if present,
/// are passed to handler invocation alongside the tag.
///
/// # Type Parameters
///
/// - `T`: The tag type (any comparable value)
/// - `V`: The payload value type, shared with resumption values
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Descriptor<T, V> {
    tag: T,
    payload: Payload<V>,
}

impl<T, V> Descriptor<T, V> {
    /// Creates a descriptor with no payload.
    #[must_use]
    pub fn bare(tag: T) -> Self {
        Self {
            tag,
            payload: SmallVec::new(),
        }
    }

    /// Creates a descriptor from a tag and its payload values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use resumable::computation::Descriptor;
    ///
    /// let descriptor = Descriptor::new("add", [1, 2]);
    /// assert_eq!(descriptor.payload(), [1, 2]);
    /// ```
    #[must_use]
    pub fn new(tag: T, payload: impl IntoIterator<Item = V>) -> Self {
        Self {
            tag,
            payload: payload.into_iter().collect(),
        }
    }

    /// Appends a payload value.
    #[must_use]
    pub fn with(mut self, value: V) -> Self {
        self.payload.push(value);
        self
    }

    /// Returns the tag.
    #[must_use]
    pub const fn tag(&self) -> &T {
        &self.tag
    }

    /// Returns the payload values.
    #[must_use]
    pub fn payload(&self) -> &[V] {
        &self.payload
    }

    /// Returns `true` if the descriptor carries no payload.
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.payload.is_empty()
    }

    /// Splits the descriptor into its tag and payload.
    #[must_use]
    pub fn into_parts(self) -> (T, Payload<V>) {
        (self.tag, self.payload)
    }
}

impl<T, V> From<T> for Descriptor<T, V> {
    fn from(tag: T) -> Self {
        Self::bare(tag)
    }
}

/// The outcome of a single drive step.
///
/// A step either suspends with a [`Descriptor`] or completes with the
/// computation's result. Failure is carried outside of `Step`, in the
/// `Err` arm of the surrounding `Result`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step<T, V, R> {
    /// The computation is waiting for a resumption value.
    Suspended(Descriptor<T, V>),
    /// The computation finished with a result.
    Done(R),
}

impl<T, V, R> Step<T, V, R> {
    /// Returns `true` if the computation has completed.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Returns `true` if the computation is waiting for a resumption value.
    #[must_use]
    pub const fn is_suspended(&self) -> bool {
        matches!(self, Self::Suspended(_))
    }

    /// Returns the descriptor of a suspended step.
    #[must_use]
    pub const fn descriptor(&self) -> Option<&Descriptor<T, V>> {
        match self {
            Self::Suspended(descriptor) => Some(descriptor),
            Self::Done(_) => None,
        }
    }

    /// Returns the result of a completed step.
    #[must_use]
    pub fn into_done(self) -> Option<R> {
        match self {
            Self::Done(result) => Some(result),
            Self::Suspended(_) => None,
        }
    }

    /// Transforms the result of a completed step, leaving suspensions intact.
    #[must_use]
    pub fn map_done<S, F>(self, function: F) -> Step<T, V, S>
    where
        F: FnOnce(R) -> S,
    {
        match self {
            Self::Suspended(descriptor) => Step::Suspended(descriptor),
            Self::Done(result) => Step::Done(function(result)),
        }
    }
}

static_assertions::assert_impl_all!(Descriptor<String, String>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Step<&'static str, i32, String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn bare_descriptor_has_empty_payload() {
        let descriptor: Descriptor<&str, i32> = Descriptor::bare("tag");
        assert!(descriptor.is_bare());
        assert_eq!(descriptor.tag(), &"tag");
        assert!(descriptor.payload().is_empty());
    }

    #[rstest]
    fn from_tag_builds_bare_descriptor() {
        let descriptor: Descriptor<&str, i32> = "tag".into();
        assert_eq!(descriptor, Descriptor::bare("tag"));
    }

    #[rstest]
    fn payload_preserves_order() {
        let descriptor = Descriptor::bare("add").with(1).with(2).with(3);
        assert_eq!(descriptor.payload(), [1, 2, 3]);
        assert!(!descriptor.is_bare());
    }

    #[rstest]
    fn into_parts_returns_tag_and_payload() {
        let (tag, payload) = Descriptor::new("add", [4, 5]).into_parts();
        assert_eq!(tag, "add");
        assert_eq!(payload.as_slice(), [4, 5]);
    }

    #[rstest]
    fn step_accessors() {
        let suspended: Step<&str, i32, String> = Step::Suspended(Descriptor::bare("tag"));
        assert!(suspended.is_suspended());
        assert_eq!(suspended.descriptor().map(Descriptor::tag), Some(&"tag"));
        assert_eq!(suspended.into_done(), None);

        let done: Step<&str, i32, String> = Step::Done("result".to_string());
        assert!(done.is_done());
        assert!(done.descriptor().is_none());
        assert_eq!(done.into_done(), Some("result".to_string()));
    }

    #[rstest]
    fn map_done_leaves_suspension_untouched() {
        let suspended: Step<&str, i32, i32> = Step::Suspended(Descriptor::bare("tag"));
        assert_eq!(
            suspended.map_done(|value| value * 2),
            Step::Suspended(Descriptor::bare("tag"))
        );

        let done: Step<&str, i32, i32> = Step::Done(21);
        assert_eq!(done.map_done(|value| value * 2), Step::Done(42));
    }
}
