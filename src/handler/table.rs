//! Keyed handler tables.
//!
//! A table maps effect tags to entries. Lookup is exact-match on the tag;
//! there is no wildcard or default entry. An entry is either a literal
//! value, which is cloned on every resolution, or a function invoked with
//! `(tag, payload)`.
//!
//! With the `fxhash` feature enabled, tables are backed by
//! `rustc_hash::FxHashMap` instead of the standard `HashMap`.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use super::Handler;
use crate::computation::Descriptor;

/// The map type backing keyed tables.
#[cfg(not(feature = "fxhash"))]
pub type TableMap<K, V> = std::collections::HashMap<K, V>;

/// The map type backing keyed tables.
#[cfg(feature = "fxhash")]
pub type TableMap<K, V> = rustc_hash::FxHashMap<K, V>;

type EntryFunction<T, V, E> = dyn Fn(&T, &[V]) -> Result<Option<V>, E> + Send + Sync;

/// An entry of a [`HandlerTable`].
pub enum Entry<T, V, E> {
    /// A literal resumption value.
    Value(V),
    /// A function of `(tag, payload)` producing the resumption value.
    Function(Arc<EntryFunction<T, V, E>>),
}

impl<T, V: Clone, E> Entry<T, V, E> {
    fn resolve(&self, descriptor: &Descriptor<T, V>) -> Result<Option<V>, E> {
        match self {
            Self::Value(value) => Ok(Some(value.clone())),
            Self::Function(function) => function(descriptor.tag(), descriptor.payload()),
        }
    }
}

impl<T, V: Clone, E> Clone for Entry<T, V, E> {
    fn clone(&self) -> Self {
        match self {
            Self::Value(value) => Self::Value(value.clone()),
            Self::Function(function) => Self::Function(Arc::clone(function)),
        }
    }
}

impl<T, V: fmt::Debug, E> fmt::Debug for Entry<T, V, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => formatter.debug_tuple("Value").field(value).finish(),
            Self::Function(_) => formatter.write_str("Function(<fn>)"),
        }
    }
}

/// A keyed handler.
///
/// # Examples
///
/// ```rust
/// use resumable::computation::Descriptor;
/// use resumable::handler::{Handler, HandlerTable};
///
/// let mut table = HandlerTable::<&str, String, ()>::new()
///     .with_value("first_name_missing", "Baba".to_string())
///     .with_function("format_name", |_tag, payload| {
///         Ok(payload.first().map(|name| name.to_uppercase()))
///     });
///
/// assert_eq!(
///     table.resolve(&Descriptor::bare("format_name").with("mac".to_string())),
///     Ok(Some("MAC".to_string()))
/// );
/// ```
pub struct HandlerTable<T, V, E> {
    entries: TableMap<T, Entry<T, V, E>>,
}

impl<T, V, E> HandlerTable<T, V, E> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: TableMap::default(),
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Eq + Hash, V, E> HandlerTable<T, V, E> {
    /// Adds a literal entry, replacing any previous entry for `tag`.
    #[must_use]
    pub fn with_value(mut self, tag: T, value: V) -> Self {
        self.insert(tag, Entry::Value(value));
        self
    }

    /// Adds a function entry, replacing any previous entry for `tag`.
    #[must_use]
    pub fn with_function<F>(mut self, tag: T, function: F) -> Self
    where
        F: Fn(&T, &[V]) -> Result<Option<V>, E> + Send + Sync + 'static,
    {
        self.insert(tag, Entry::Function(Arc::new(function)));
        self
    }

    /// Inserts an entry, returning the previous one for `tag`.
    pub fn insert(&mut self, tag: T, entry: Entry<T, V, E>) -> Option<Entry<T, V, E>> {
        self.entries.insert(tag, entry)
    }

    /// Removes the entry for `tag`.
    pub fn remove(&mut self, tag: &T) -> Option<Entry<T, V, E>> {
        self.entries.remove(tag)
    }

    /// Returns `true` if the table has an entry for `tag`.
    #[must_use]
    pub fn contains(&self, tag: &T) -> bool {
        self.entries.contains_key(tag)
    }

    /// Returns the entry for `tag`.
    #[must_use]
    pub fn get(&self, tag: &T) -> Option<&Entry<T, V, E>> {
        self.entries.get(tag)
    }
}

impl<T, V, E> Default for HandlerTable<T, V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, V: Clone, E> Clone for HandlerTable<T, V, E> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<T: fmt::Debug, V: fmt::Debug, E> fmt::Debug for HandlerTable<T, V, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_map()
            .entries(self.entries.iter())
            .finish()
    }
}

impl<T: Eq + Hash, V, E> FromIterator<(T, V)> for HandlerTable<T, V, E> {
    fn from_iter<I: IntoIterator<Item = (T, V)>>(iterator: I) -> Self {
        Self {
            entries: iterator
                .into_iter()
                .map(|(tag, value)| (tag, Entry::Value(value)))
                .collect(),
        }
    }
}

impl<T: Eq + Hash, V: Clone, E> Handler<T, V, E> for HandlerTable<T, V, E> {
    fn resolve(&mut self, descriptor: &Descriptor<T, V>) -> Result<Option<V>, E> {
        match self.entries.get(descriptor.tag()) {
            Some(entry) => entry.resolve(descriptor),
            None => Ok(None),
        }
    }
}

#[cfg(feature = "async")]
pub use self::asynchronous::{AsyncEntry, AsyncHandlerTable};

#[cfg(feature = "async")]
mod asynchronous {
    use std::fmt;
    use std::hash::Hash;
    use std::sync::Arc;

    use futures::future::{BoxFuture, FutureExt};

    use super::{Entry, HandlerTable, TableMap};
    use crate::computation::Descriptor;
    use crate::handler::{AsyncHandler, Handler};

    type AsyncEntryFunction<T, V, E> =
        dyn Fn(&T, &[V]) -> BoxFuture<'static, Result<Option<V>, E>> + Send + Sync;

    /// An entry of an [`AsyncHandlerTable`].
    pub enum AsyncEntry<T, V, E> {
        /// A literal value or synchronous function.
        Ready(Entry<T, V, E>),
        /// A function of `(tag, payload)` whose value is awaited.
        Deferred(Arc<AsyncEntryFunction<T, V, E>>),
    }

    impl<T, V: Clone, E> Clone for AsyncEntry<T, V, E> {
        fn clone(&self) -> Self {
            match self {
                Self::Ready(entry) => Self::Ready(entry.clone()),
                Self::Deferred(function) => Self::Deferred(Arc::clone(function)),
            }
        }
    }

    impl<T, V: fmt::Debug, E> fmt::Debug for AsyncEntry<T, V, E> {
        fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Ready(entry) => entry.fmt(formatter),
                Self::Deferred(_) => formatter.write_str("Deferred(<fn>)"),
            }
        }
    }

    /// A keyed handler whose entries may resolve asynchronously.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use resumable::computation::Descriptor;
    /// use resumable::handler::{AsyncHandler, AsyncHandlerTable};
    ///
    /// let mut table = AsyncHandlerTable::<&str, String, ()>::new()
    ///     .with_value("last_name_missing", "Voss".to_string())
    ///     .with_async_function("first_name_missing", |_tag, _payload| async {
    ///         Ok(Some("Baba".to_string()))
    ///     });
    ///
    /// let resolved = futures::executor::block_on(
    ///     table.resolve(&Descriptor::bare("first_name_missing")),
    /// );
    /// assert_eq!(resolved, Ok(Some("Baba".to_string())));
    /// ```
    pub struct AsyncHandlerTable<T, V, E> {
        entries: TableMap<T, AsyncEntry<T, V, E>>,
    }

    impl<T, V, E> AsyncHandlerTable<T, V, E> {
        /// Creates an empty table.
        #[must_use]
        pub fn new() -> Self {
            Self {
                entries: TableMap::default(),
            }
        }

        /// Returns the number of entries.
        #[must_use]
        pub fn len(&self) -> usize {
            self.entries.len()
        }

        /// Returns `true` if the table has no entries.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.entries.is_empty()
        }
    }

    impl<T: Eq + Hash, V, E> AsyncHandlerTable<T, V, E> {
        /// Adds a literal entry.
        #[must_use]
        pub fn with_value(mut self, tag: T, value: V) -> Self {
            self.entries.insert(tag, AsyncEntry::Ready(Entry::Value(value)));
            self
        }

        /// Adds a synchronous function entry.
        #[must_use]
        pub fn with_function<F>(mut self, tag: T, function: F) -> Self
        where
            F: Fn(&T, &[V]) -> Result<Option<V>, E> + Send + Sync + 'static,
        {
            self.entries
                .insert(tag, AsyncEntry::Ready(Entry::Function(Arc::new(function))));
            self
        }

        /// Adds an asynchronous function entry.
        #[must_use]
        pub fn with_async_function<F, Fut>(mut self, tag: T, function: F) -> Self
        where
            F: Fn(&T, &[V]) -> Fut + Send + Sync + 'static,
            Fut: Future<Output = Result<Option<V>, E>> + Send + 'static,
        {
            let deferred: Arc<AsyncEntryFunction<T, V, E>> =
                Arc::new(move |tag: &T, payload: &[V]| function(tag, payload).boxed());
            self.entries.insert(tag, AsyncEntry::Deferred(deferred));
            self
        }

        /// Returns `true` if the table has an entry for `tag`.
        #[must_use]
        pub fn contains(&self, tag: &T) -> bool {
            self.entries.contains_key(tag)
        }
    }

    impl<T, V, E> Default for AsyncHandlerTable<T, V, E> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<T: Clone, V: Clone, E> Clone for AsyncHandlerTable<T, V, E> {
        fn clone(&self) -> Self {
            Self {
                entries: self.entries.clone(),
            }
        }
    }

    impl<T: fmt::Debug, V: fmt::Debug, E> fmt::Debug for AsyncHandlerTable<T, V, E> {
        fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter
                .debug_map()
                .entries(self.entries.iter())
                .finish()
        }
    }

    impl<T: Eq + Hash, V, E> From<HandlerTable<T, V, E>> for AsyncHandlerTable<T, V, E> {
        fn from(table: HandlerTable<T, V, E>) -> Self {
            Self {
                entries: table
                    .entries
                    .into_iter()
                    .map(|(tag, entry)| (tag, AsyncEntry::Ready(entry)))
                    .collect(),
            }
        }
    }

    impl<T: Eq + Hash, V: Clone, E> AsyncHandler<T, V, E> for HandlerTable<T, V, E> {
        #[inline]
        fn resolve(
            &mut self,
            descriptor: &Descriptor<T, V>,
        ) -> impl Future<Output = Result<Option<V>, E>> {
            std::future::ready(Handler::resolve(self, descriptor))
        }
    }

    impl<T: Eq + Hash, V: Clone, E> AsyncHandler<T, V, E> for AsyncHandlerTable<T, V, E> {
        async fn resolve(&mut self, descriptor: &Descriptor<T, V>) -> Result<Option<V>, E> {
            match self.entries.get(descriptor.tag()) {
                Some(AsyncEntry::Ready(entry)) => entry.resolve(descriptor),
                Some(AsyncEntry::Deferred(function)) => {
                    function(descriptor.tag(), descriptor.payload()).await
                }
                None => Ok(None),
            }
        }
    }
}

static_assertions::assert_impl_all!(HandlerTable<&'static str, String, String>: Send, Sync, Clone);
