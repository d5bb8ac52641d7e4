//! Mandatory bindings.
//!
//! A restricted form of binding: the bindings are a plain table of tags to
//! literal values, and an effect is answered by the table exactly when its
//! tag is a member of the table. Whatever value is stored is honored, and
//! the eventual driver can never override it. Only tags absent from the
//! table are forwarded outward.

use std::fmt;
use std::hash::Hash;

use super::BoundSync;
use crate::computation::{Computation, Descriptor, Step};
use crate::handler::{Handler, TableMap};

/// A membership-tested table of literal bindings.
///
/// # Examples
///
/// ```rust
/// use resumable::binding::Bindings;
///
/// let bindings: Bindings<&str, Option<String>> =
///     [("nickname_missing", None)].into_iter().collect();
/// assert!(bindings.contains(&"nickname_missing"));
/// assert_eq!(bindings.get(&"nickname_missing"), Some(&None));
/// ```
#[derive(Clone)]
pub struct Bindings<T, V> {
    values: TableMap<T, V>,
}

impl<T, V> Bindings<T, V> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: TableMap::default(),
        }
    }

    /// Returns the number of bound tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no tag is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T: Eq + Hash, V> Bindings<T, V> {
    /// Binds `tag` to `value`.
    #[must_use]
    pub fn with(mut self, tag: T, value: V) -> Self {
        self.values.insert(tag, value);
        self
    }

    /// Returns `true` if `tag` is bound.
    #[must_use]
    pub fn contains(&self, tag: &T) -> bool {
        self.values.contains_key(tag)
    }

    /// Returns the value bound to `tag`.
    #[must_use]
    pub fn get(&self, tag: &T) -> Option<&V> {
        self.values.get(tag)
    }
}

impl<T, V> Default for Bindings<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, V: fmt::Debug> fmt::Debug for Bindings<T, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.values.iter()).finish()
    }
}

impl<T: Eq + Hash, V> FromIterator<(T, V)> for Bindings<T, V> {
    fn from_iter<I: IntoIterator<Item = (T, V)>>(iterator: I) -> Self {
        Self {
            values: iterator.into_iter().collect(),
        }
    }
}

impl<T: Eq + Hash, V: Clone, E> Handler<T, V, E> for Bindings<T, V> {
    fn resolve(&mut self, descriptor: &Descriptor<T, V>) -> Result<Option<V>, E> {
        Ok(self.values.get(descriptor.tag()).cloned())
    }
}

/// Wraps a computation constructor so that every computation it builds
/// answers the tags in `bindings` itself.
///
/// # Examples
///
/// ```rust
/// use resumable::binding::{Bindings, always_sync};
/// use resumable::computation::{ComputationExt, perform};
/// use resumable::drive::drive_sync;
/// use resumable::handler::HandlerTable;
///
/// let hostile = always_sync(
///     |_: ()| perform::<_, String, ()>("disposition_missing").map(Option::unwrap_or_default),
///     Bindings::new().with("disposition_missing", "hostile".to_string()),
/// );
/// let handler = HandlerTable::new().with_value("disposition_missing", "friendly".to_string());
/// assert_eq!(drive_sync(hostile(()), handler), Ok("hostile".to_string()));
/// ```
pub fn always_sync<A, C, F>(
    constructor: F,
    bindings: Bindings<C::Tag, C::Value>,
) -> impl Fn(A) -> AlwaysSync<C, C::Tag, C::Value>
where
    F: Fn(A) -> C,
    C: Computation,
    C::Tag: Eq + Hash + Clone,
    C::Value: Clone,
{
    move |arguments| AlwaysSync::new(constructor(arguments), bindings.clone())
}

/// A synchronous computation with mandatory bindings.
///
/// Created by [`always_sync`] or
/// [`ComputationExt::with_mandatory_bindings`](crate::computation::ComputationExt::with_mandatory_bindings).
pub struct AlwaysSync<C, T, V> {
    bound: BoundSync<C, Bindings<T, V>>,
}

impl<C, T, V> AlwaysSync<C, T, V>
where
    C: Computation<Tag = T, Value = V>,
    T: Eq + Hash,
    V: Clone,
{
    /// Binds an already-constructed computation.
    #[must_use]
    pub const fn new(inner: C, bindings: Bindings<T, V>) -> Self {
        Self {
            bound: BoundSync::new(inner, bindings),
        }
    }
}

impl<C, T, V> fmt::Debug for AlwaysSync<C, T, V>
where
    C: fmt::Debug,
    T: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AlwaysSync")
            .field("bound", &self.bound)
            .finish()
    }
}

impl<C, T, V> Computation for AlwaysSync<C, T, V>
where
    C: Computation<Tag = T, Value = V>,
    T: Eq + Hash,
    V: Clone,
{
    type Tag = C::Tag;
    type Value = C::Value;
    type Output = C::Output;
    type Error = C::Error;

    #[inline]
    fn start(&mut self) -> Result<Step<C::Tag, C::Value, C::Output>, C::Error> {
        self.bound.start()
    }

    #[inline]
    fn resume(
        &mut self,
        value: Option<C::Value>,
    ) -> Result<Step<C::Tag, C::Value, C::Output>, C::Error> {
        self.bound.resume(value)
    }

    #[inline]
    fn fail(&mut self, error: C::Error) -> Result<Step<C::Tag, C::Value, C::Output>, C::Error> {
        self.bound.fail(error)
    }
}

#[cfg(feature = "async")]
pub use self::asynchronous::{Always, always};

#[cfg(feature = "async")]
mod asynchronous {
    use std::fmt;
    use std::hash::Hash;

    use super::Bindings;
    use crate::binding::Bound;
    use crate::computation::{AsyncComputation, Descriptor, Step};
    use crate::handler::AsyncHandler;

    impl<T: Eq + Hash, V: Clone, E> AsyncHandler<T, V, E> for Bindings<T, V> {
        #[inline]
        fn resolve(
            &mut self,
            descriptor: &Descriptor<T, V>,
        ) -> impl Future<Output = Result<Option<V>, E>> {
            std::future::ready(Ok(self.values.get(descriptor.tag()).cloned()))
        }
    }

    /// Wraps a computation constructor so that every computation it builds
    /// answers the tags in `bindings` itself, for asynchronous driving.
    pub fn always<A, C, F>(
        constructor: F,
        bindings: Bindings<C::Tag, C::Value>,
    ) -> impl Fn(A) -> Always<C, C::Tag, C::Value>
    where
        F: Fn(A) -> C,
        C: AsyncComputation,
        C::Tag: Eq + Hash + Clone,
        C::Value: Clone,
    {
        move |arguments| Always::new(constructor(arguments), bindings.clone())
    }

    /// An asynchronous computation with mandatory bindings.
    ///
    /// Created by [`always`].
    pub struct Always<C, T, V> {
        bound: Bound<C, Bindings<T, V>>,
    }

    impl<C, T, V> Always<C, T, V>
    where
        C: AsyncComputation<Tag = T, Value = V>,
        T: Eq + Hash,
        V: Clone,
    {
        /// Binds an already-constructed computation.
        #[must_use]
        pub const fn new(inner: C, bindings: Bindings<T, V>) -> Self {
            Self {
                bound: Bound::new(inner, bindings),
            }
        }
    }

    impl<C, T, V> fmt::Debug for Always<C, T, V>
    where
        C: fmt::Debug,
        T: fmt::Debug,
        V: fmt::Debug,
    {
        fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter
                .debug_struct("Always")
                .field("bound", &self.bound)
                .finish()
        }
    }

    impl<C, T, V> AsyncComputation for Always<C, T, V>
    where
        C: AsyncComputation<Tag = T, Value = V>,
        T: Eq + Hash,
        V: Clone,
    {
        type Tag = C::Tag;
        type Value = C::Value;
        type Output = C::Output;
        type Error = C::Error;

        async fn start(&mut self) -> Result<Step<C::Tag, C::Value, C::Output>, C::Error> {
            self.bound.start().await
        }

        async fn resume(
            &mut self,
            value: Option<C::Value>,
        ) -> Result<Step<C::Tag, C::Value, C::Output>, C::Error> {
            self.bound.resume(value).await
        }

        async fn fail(
            &mut self,
            error: C::Error,
        ) -> Result<Step<C::Tag, C::Value, C::Output>, C::Error> {
            self.bound.fail(error).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::computation::{ComputationExt, perform};
    use crate::drive::drive_sync;
    use crate::handler::{HandlerTable, Unhandled};
    use rstest::rstest;

    #[rstest]
    fn membership_decides_resolution() {
        let mut bindings: Bindings<&str, i32> = Bindings::new().with("bound", 0);
        assert_eq!(
            Handler::<_, _, ()>::resolve(&mut bindings, &Descriptor::bare("bound")),
            Ok(Some(0))
        );
        assert_eq!(
            Handler::<_, _, ()>::resolve(&mut bindings, &Descriptor::bare("unbound")),
            Ok(None)
        );
    }

    #[rstest]
    fn empty_looking_value_is_still_honored() {
        let computation = perform::<_, Option<String>, ()>("nickname_missing")
            .with_mandatory_bindings(Bindings::new().with("nickname_missing", None));
        let handler =
            HandlerTable::new().with_value("nickname_missing", Some("Toodle".to_string()));
        assert_eq!(drive_sync(computation, handler), Ok(Some(None)));
    }

    #[rstest]
    fn driver_cannot_override_bound_tag() {
        let computation = perform::<_, String, ()>("first")
            .and_then(|first| perform("second").map(move |second| (first, second)))
            .with_mandatory_bindings(Bindings::new().with("first", "bound".to_string()));
        let handler = HandlerTable::new()
            .with_value("first", "driver".to_string())
            .with_value("second", "driver".to_string());
        assert_eq!(
            drive_sync(computation, handler),
            Ok((Some("bound".to_string()), Some("driver".to_string())))
        );
    }

    #[rstest]
    fn always_sync_forwards_absent_tags() {
        let constructor = always_sync(
            |_: ()| perform::<_, i32, ()>("unbound"),
            Bindings::new().with("bound", 1),
        );
        assert_eq!(drive_sync(constructor(()), Unhandled), Ok(None));
    }

    #[rstest]
    fn wrapper_is_named_by_tag_and_value() {
        let computation: AlwaysSync<_, &str, i32> =
            AlwaysSync::new(perform::<_, i32, ()>("bound"), Bindings::new().with("bound", 7));
        assert_eq!(drive_sync(computation, Unhandled), Ok(Some(7)));
    }

    #[rstest]
    fn debug_lists_bound_values() {
        let bindings: Bindings<&str, i32> = Bindings::new().with("answer", 42);
        assert_eq!(format!("{bindings:?}"), "{\"answer\": 42}");
    }
}
