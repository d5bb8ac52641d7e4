//! Effect handlers.
//!
//! A handler maps an effect [`Descriptor`] to the value the suspended
//! computation resumes with. Three handler shapes are supported, each
//! through an adapter rather than by inspecting values at runtime:
//!
//! | Shape        | Adapter                                   |
//! |--------------|-------------------------------------------|
//! | function     | [`from_fn`] / [`HandlerFn`]               |
//! | keyed table  | [`HandlerTable`]                          |
//! | absent       | [`Unhandled`], `Option<H>` set to `None`  |
//!
//! Resolution returns `Ok(None)` when the descriptor is unresolved. The
//! asynchronous counterparts ([`AsyncHandler`], [`from_async_fn`],
//! [`AsyncHandlerTable`]) may await before producing the value. The
//! synchronous adapters implement both traits.
//!
//! # Examples
//!
//! ```rust
//! use resumable::computation::Descriptor;
//! use resumable::handler::{Handler, HandlerTable, from_fn};
//!
//! let mut capitalize = from_fn(|_tag: &&str, payload: &[String]| {
//!     Ok::<_, ()>(payload.first().map(|name| name.to_uppercase()))
//! });
//! let descriptor = Descriptor::bare("format_name").with("mac".to_string());
//! assert_eq!(capitalize.resolve(&descriptor), Ok(Some("MAC".to_string())));
//!
//! let mut table = HandlerTable::<_, _, ()>::new().with_value("first_name_missing", "Baba");
//! assert_eq!(table.resolve(&Descriptor::bare("first_name_missing")), Ok(Some("Baba")));
//! assert_eq!(table.resolve(&Descriptor::bare("unknown")), Ok(None));
//! ```

mod table;

pub use table::{Entry, HandlerTable, TableMap};
#[cfg(feature = "async")]
pub use table::{AsyncEntry, AsyncHandlerTable};

use crate::computation::Descriptor;
use crate::error::UnhandledEffectError;

/// Resolves effect descriptors to resumption values.
///
/// # Type Parameters
///
/// - `T`: The effect tag type
/// - `V`: The payload and resumption value type
/// - `E`: The failure type shared with the driven computation
pub trait Handler<T, V, E> {
    /// Resolves `descriptor`.
    ///
    /// Returns `Ok(None)` when this handler has no answer for the descriptor.
    ///
    /// # Errors
    ///
    /// Returns the handler's failure; the driver injects it into the
    /// computation at the current suspension.
    fn resolve(&mut self, descriptor: &Descriptor<T, V>) -> Result<Option<V>, E>;
}

impl<T, V, E, H> Handler<T, V, E> for &mut H
where
    H: Handler<T, V, E> + ?Sized,
{
    #[inline]
    fn resolve(&mut self, descriptor: &Descriptor<T, V>) -> Result<Option<V>, E> {
        (**self).resolve(descriptor)
    }
}

impl<T, V, E, H> Handler<T, V, E> for Option<H>
where
    H: Handler<T, V, E>,
{
    #[inline]
    fn resolve(&mut self, descriptor: &Descriptor<T, V>) -> Result<Option<V>, E> {
        match self {
            Some(handler) => handler.resolve(descriptor),
            None => Ok(None),
        }
    }
}

/// The absent handler: leaves every descriptor unresolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unhandled;

impl<T, V, E> Handler<T, V, E> for Unhandled {
    #[inline]
    fn resolve(&mut self, _descriptor: &Descriptor<T, V>) -> Result<Option<V>, E> {
        Ok(None)
    }
}

/// A handler backed by a function of `(tag, payload)`.
///
/// Created by [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct HandlerFn<F>(F);

/// Wraps a function of `(tag, payload)` as a handler.
///
/// The function returns `Ok(None)` for descriptors it does not resolve.
#[must_use]
pub const fn from_fn<F>(function: F) -> HandlerFn<F> {
    HandlerFn(function)
}

impl<T, V, E, F> Handler<T, V, E> for HandlerFn<F>
where
    F: FnMut(&T, &[V]) -> Result<Option<V>, E>,
{
    #[inline]
    fn resolve(&mut self, descriptor: &Descriptor<T, V>) -> Result<Option<V>, E> {
        (self.0)(descriptor.tag(), descriptor.payload())
    }
}

/// A handler that fails on unresolved descriptors.
///
/// Instead of resuming with the absent marker, an unresolved descriptor
/// becomes an [`UnhandledEffectError`] converted into the computation's
/// failure type. Created by [`strict`].
#[derive(Debug, Clone)]
pub struct Strict<H>(H);

/// Wraps `handler` so that unresolved descriptors fail.
///
/// # Examples
///
/// ```rust
/// use resumable::computation::Descriptor;
/// use resumable::error::UnhandledEffectError;
/// use resumable::handler::{Handler, Unhandled, strict};
///
/// let mut handler = strict(Unhandled);
/// let resolved: Result<Option<i32>, UnhandledEffectError<&str>> =
///     handler.resolve(&Descriptor::bare("missing"));
/// assert_eq!(resolved, Err(UnhandledEffectError::new("missing")));
/// ```
#[must_use]
pub const fn strict<H>(handler: H) -> Strict<H> {
    Strict(handler)
}

impl<T, V, E, H> Handler<T, V, E> for Strict<H>
where
    H: Handler<T, V, E>,
    T: Clone,
    E: From<UnhandledEffectError<T>>,
{
    fn resolve(&mut self, descriptor: &Descriptor<T, V>) -> Result<Option<V>, E> {
        match self.0.resolve(descriptor)? {
            Some(value) => Ok(Some(value)),
            None => Err(UnhandledEffectError::new(descriptor.tag().clone()).into()),
        }
    }
}

/// Resolves effect descriptors asynchronously.
///
/// The synchronous adapters ([`HandlerFn`], [`HandlerTable`], [`Unhandled`],
/// [`Strict`], `Option<H>` and `&mut H`) are also asynchronous handlers whose
/// resolution is immediately ready.
#[cfg(feature = "async")]
pub trait AsyncHandler<T, V, E> {
    /// Resolves `descriptor`, possibly awaiting the value.
    fn resolve(
        &mut self,
        descriptor: &Descriptor<T, V>,
    ) -> impl Future<Output = Result<Option<V>, E>>;
}

#[cfg(feature = "async")]
impl<T, V, E, H> AsyncHandler<T, V, E> for &mut H
where
    H: AsyncHandler<T, V, E> + ?Sized,
{
    #[inline]
    fn resolve(
        &mut self,
        descriptor: &Descriptor<T, V>,
    ) -> impl Future<Output = Result<Option<V>, E>> {
        AsyncHandler::resolve(&mut **self, descriptor)
    }
}

#[cfg(feature = "async")]
impl<T, V, E, H> AsyncHandler<T, V, E> for Option<H>
where
    H: AsyncHandler<T, V, E>,
{
    async fn resolve(&mut self, descriptor: &Descriptor<T, V>) -> Result<Option<V>, E> {
        match self {
            Some(handler) => AsyncHandler::resolve(handler, descriptor).await,
            None => Ok(None),
        }
    }
}

#[cfg(feature = "async")]
impl<T, V, E> AsyncHandler<T, V, E> for Unhandled {
    #[inline]
    fn resolve(
        &mut self,
        _descriptor: &Descriptor<T, V>,
    ) -> impl Future<Output = Result<Option<V>, E>> {
        std::future::ready(Ok(None))
    }
}

#[cfg(feature = "async")]
impl<T, V, E, F> AsyncHandler<T, V, E> for HandlerFn<F>
where
    F: FnMut(&T, &[V]) -> Result<Option<V>, E>,
{
    #[inline]
    fn resolve(
        &mut self,
        descriptor: &Descriptor<T, V>,
    ) -> impl Future<Output = Result<Option<V>, E>> {
        std::future::ready(Handler::resolve(self, descriptor))
    }
}

#[cfg(feature = "async")]
impl<T, V, E, H> AsyncHandler<T, V, E> for Strict<H>
where
    H: AsyncHandler<T, V, E>,
    T: Clone,
    E: From<UnhandledEffectError<T>>,
{
    async fn resolve(&mut self, descriptor: &Descriptor<T, V>) -> Result<Option<V>, E> {
        match AsyncHandler::resolve(&mut self.0, descriptor).await? {
            Some(value) => Ok(Some(value)),
            None => Err(UnhandledEffectError::new(descriptor.tag().clone()).into()),
        }
    }
}

/// A handler backed by an asynchronous function of `(tag, payload)`.
///
/// Created by [`from_async_fn`].
#[cfg(feature = "async")]
#[derive(Debug, Clone, Copy)]
pub struct AsyncHandlerFn<F>(F);

/// Wraps a function of `(tag, payload)` returning a future as a handler.
///
/// # Examples
///
/// ```rust
/// use resumable::computation::Descriptor;
/// use resumable::handler::{AsyncHandler, from_async_fn};
///
/// let mut handler = from_async_fn(|tag: &&str, _payload: &[String]| {
///     let answer = (*tag == "first_name_missing").then(|| "Baba".to_string());
///     async move { Ok::<_, ()>(answer) }
/// });
///
/// let resolved = futures::executor::block_on(
///     handler.resolve(&Descriptor::bare("first_name_missing")),
/// );
/// assert_eq!(resolved, Ok(Some("Baba".to_string())));
/// ```
#[cfg(feature = "async")]
#[must_use]
pub const fn from_async_fn<F>(function: F) -> AsyncHandlerFn<F> {
    AsyncHandlerFn(function)
}

#[cfg(feature = "async")]
impl<T, V, E, F, Fut> AsyncHandler<T, V, E> for AsyncHandlerFn<F>
where
    F: FnMut(&T, &[V]) -> Fut,
    Fut: Future<Output = Result<Option<V>, E>>,
{
    #[inline]
    fn resolve(
        &mut self,
        descriptor: &Descriptor<T, V>,
    ) -> impl Future<Output = Result<Option<V>, E>> {
        (self.0)(descriptor.tag(), descriptor.payload())
    }
}
