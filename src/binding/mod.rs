//! Pre-binding effects before a computation is driven.
//!
//! A bound computation wraps an inner computation together with a set of
//! bindings. Whenever the inner computation suspends, the bindings are
//! consulted first:
//!
//! - resolved: the inner computation is resumed directly, and no outer
//!   driver ever sees the effect
//! - unresolved: the bound computation itself suspends with the same
//!   descriptor, and forwards the outer resumption value unchanged
//!
//! Binding layers compose: an outer layer only sees the effects that no
//! inner layer resolved, and the eventual driver only sees the effects that
//! no layer resolved.
//!
//! # Failures
//!
//! A failure raised while resolving a binding is injected into the inner
//! computation at its current suspension. A failure escaping the inner
//! computation propagates out of the bound computation unchanged.
//!
//! # Examples
//!
//! ```rust
//! use resumable::binding::bind_sync;
//! use resumable::computation::{ComputationExt, perform};
//! use resumable::drive::drive_sync;
//! use resumable::handler::HandlerTable;
//!
//! let greet = |last: &'static str| {
//!     perform::<_, String, ()>("first_name_missing")
//!         .map(move |first| format!("Hello, {} {last}", first.unwrap_or_default()))
//! };
//! let greet_joe = bind_sync(
//!     greet,
//!     HandlerTable::new().with_value("first_name_missing", "Joe".to_string()),
//! );
//!
//! let handler = HandlerTable::new().with_value("first_name_missing", "Bob".to_string());
//! assert_eq!(drive_sync(greet_joe("Voss"), handler), Ok("Hello, Joe Voss".to_string()));
//! ```

mod always;

#[cfg(feature = "async")]
pub use always::{Always, always};
pub use always::{AlwaysSync, Bindings, always_sync};

use crate::computation::{Computation, Step};
use crate::handler::Handler;

/// Wraps a computation constructor so that every computation it builds is
/// bound to `bindings`.
///
/// The returned constructor takes the same argument as `constructor`;
/// constructors of several arguments take a tuple.
pub fn bind_sync<A, C, F, B>(constructor: F, bindings: B) -> impl Fn(A) -> BoundSync<C, B>
where
    F: Fn(A) -> C,
    C: Computation,
    B: Handler<C::Tag, C::Value, C::Error> + Clone,
{
    move |arguments| BoundSync::new(constructor(arguments), bindings.clone())
}

/// A synchronous computation whose effects are first offered to bindings.
///
/// Created by [`bind_sync`] or
/// [`ComputationExt::with_bindings`](crate::computation::ComputationExt::with_bindings).
#[derive(Debug, Clone)]
pub struct BoundSync<C, B> {
    inner: C,
    bindings: B,
}

impl<C, B> BoundSync<C, B>
where
    C: Computation,
    B: Handler<C::Tag, C::Value, C::Error>,
{
    /// Binds an already-constructed computation.
    #[must_use]
    pub const fn new(inner: C, bindings: B) -> Self {
        Self { inner, bindings }
    }

    /// Resolves inner suspensions against the bindings until one is left
    /// unresolved or the inner computation finishes.
    fn settle(
        &mut self,
        mut step: Step<C::Tag, C::Value, C::Output>,
    ) -> Result<Step<C::Tag, C::Value, C::Output>, C::Error> {
        loop {
            let descriptor = match step {
                Step::Done(output) => return Ok(Step::Done(output)),
                Step::Suspended(descriptor) => descriptor,
            };
            step = match self.bindings.resolve(&descriptor) {
                Ok(Some(value)) => {
                    tracing::trace!("effect resolved by binding");
                    self.inner.resume(Some(value))?
                }
                Ok(None) => {
                    tracing::trace!("effect forwarded to outer handler");
                    return Ok(Step::Suspended(descriptor));
                }
                Err(error) => {
                    tracing::debug!("binding failed; injecting failure into inner computation");
                    self.inner.fail(error)?
                }
            };
        }
    }

    /// Returns the bindings.
    #[must_use]
    pub const fn bindings(&self) -> &B {
        &self.bindings
    }

    /// Unwraps the inner computation and bindings.
    #[must_use]
    pub fn into_parts(self) -> (C, B) {
        (self.inner, self.bindings)
    }
}

impl<C, B> Computation for BoundSync<C, B>
where
    C: Computation,
    B: Handler<C::Tag, C::Value, C::Error>,
{
    type Tag = C::Tag;
    type Value = C::Value;
    type Output = C::Output;
    type Error = C::Error;

    fn start(&mut self) -> Result<Step<C::Tag, C::Value, C::Output>, C::Error> {
        let step = self.inner.start()?;
        self.settle(step)
    }

    fn resume(
        &mut self,
        value: Option<C::Value>,
    ) -> Result<Step<C::Tag, C::Value, C::Output>, C::Error> {
        let step = self.inner.resume(value)?;
        self.settle(step)
    }

    fn fail(&mut self, error: C::Error) -> Result<Step<C::Tag, C::Value, C::Output>, C::Error> {
        let step = self.inner.fail(error)?;
        self.settle(step)
    }
}

#[cfg(feature = "async")]
pub use self::asynchronous::{Bound, bind};

#[cfg(feature = "async")]
mod asynchronous {
    use crate::computation::{AsyncComputation, Step};
    use crate::handler::AsyncHandler;

    /// Wraps a computation constructor so that every computation it builds
    /// is bound to `bindings`, which may resolve asynchronously.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use resumable::binding::bind;
    /// use resumable::computation::{ComputationExt, perform};
    /// use resumable::drive::drive_async;
    /// use resumable::handler::{AsyncHandlerTable, from_fn};
    ///
    /// let greet = |_: ()| {
    ///     perform::<_, String, ()>("first_name_missing")
    ///         .map(|first| format!("Hello, {}", first.unwrap_or_default()))
    /// };
    /// let greet_phil = bind(
    ///     greet,
    ///     AsyncHandlerTable::new().with_async_function("first_name_missing", |_, _| async {
    ///         Ok(Some("Phil".to_string()))
    ///     }),
    /// );
    ///
    /// let handler = from_fn(|_: &&str, _: &[String]| Ok(Some("Bob".to_string())));
    /// let result = futures::executor::block_on(drive_async(greet_phil(()), handler));
    /// assert_eq!(result, Ok("Hello, Phil".to_string()));
    /// ```
    pub fn bind<A, C, F, B>(constructor: F, bindings: B) -> impl Fn(A) -> Bound<C, B>
    where
        F: Fn(A) -> C,
        C: AsyncComputation,
        B: AsyncHandler<C::Tag, C::Value, C::Error> + Clone,
    {
        move |arguments| Bound::new(constructor(arguments), bindings.clone())
    }

    /// An asynchronous computation whose effects are first offered to
    /// bindings.
    ///
    /// Created by [`bind`].
    #[derive(Debug, Clone)]
    pub struct Bound<C, B> {
        inner: C,
        bindings: B,
    }

    impl<C, B> Bound<C, B>
    where
        C: AsyncComputation,
        B: AsyncHandler<C::Tag, C::Value, C::Error>,
    {
        /// Binds an already-constructed computation.
        #[must_use]
        pub const fn new(inner: C, bindings: B) -> Self {
            Self { inner, bindings }
        }

        async fn settle(
            &mut self,
            mut step: Step<C::Tag, C::Value, C::Output>,
        ) -> Result<Step<C::Tag, C::Value, C::Output>, C::Error> {
            loop {
                let descriptor = match step {
                    Step::Done(output) => return Ok(Step::Done(output)),
                    Step::Suspended(descriptor) => descriptor,
                };
                step = match self.bindings.resolve(&descriptor).await {
                    Ok(Some(value)) => {
                        tracing::trace!("effect resolved by binding");
                        self.inner.resume(Some(value)).await?
                    }
                    Ok(None) => {
                        tracing::trace!("effect forwarded to outer handler");
                        return Ok(Step::Suspended(descriptor));
                    }
                    Err(error) => {
                        tracing::debug!(
                            "binding failed; injecting failure into inner computation"
                        );
                        self.inner.fail(error).await?
                    }
                };
            }
        }

        /// Unwraps the inner computation and bindings.
        #[must_use]
        pub fn into_parts(self) -> (C, B) {
            (self.inner, self.bindings)
        }
    }

    impl<C, B> AsyncComputation for Bound<C, B>
    where
        C: AsyncComputation,
        B: AsyncHandler<C::Tag, C::Value, C::Error>,
    {
        type Tag = C::Tag;
        type Value = C::Value;
        type Output = C::Output;
        type Error = C::Error;

        async fn start(&mut self) -> Result<Step<C::Tag, C::Value, C::Output>, C::Error> {
            let step = self.inner.start().await?;
            self.settle(step).await
        }

        async fn resume(
            &mut self,
            value: Option<C::Value>,
        ) -> Result<Step<C::Tag, C::Value, C::Output>, C::Error> {
            let step = self.inner.resume(value).await?;
            self.settle(step).await
        }

        async fn fail(
            &mut self,
            error: C::Error,
        ) -> Result<Step<C::Tag, C::Value, C::Output>, C::Error> {
            let step = self.inner.fail(error).await?;
            self.settle(step).await
        }
    }
}
