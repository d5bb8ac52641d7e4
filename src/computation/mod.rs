//! Resumable computations.
//!
//! A resumable computation is a stateful, single-use process that is driven
//! forward one step at a time. Each step either suspends with a
//! [`Descriptor`], completes with a result, or fails with an error.
//!
//! # Core Concepts
//!
//! - [`Computation`]: the synchronous `start` / `resume` / `fail` protocol
//! - [`AsyncComputation`]: the same protocol with asynchronous steps
//! - [`Step`]: `Suspended(Descriptor)` or `Done(result)`
//! - [`ComputationExt`]: delegation combinators (`map`, `and_then`, `or_else`)
//!
//! # Protocol
//!
//! ```text
//! start()          -> Suspended(d) | Done(r) | Err(e)
//! resume(Some(v))  -> Suspended(d) | Done(r) | Err(e)
//! resume(None)     -> resumption with the absent marker
//! fail(e)          -> inject e at the current suspension
//! ```
//!
//! A computation that returned `Done` or `Err` is exhausted and must not be
//! driven again.
//!
//! # Examples
//!
//! ```rust
//! use resumable::computation::{Computation, ComputationExt, Step, perform};
//!
//! let mut greeting = perform::<_, String, ()>("name_missing")
//!     .map(|name| format!("Hello, {}", name.unwrap_or_default()));
//!
//! assert!(greeting.start().unwrap().is_suspended());
//! assert_eq!(
//!     greeting.resume(Some("Baba".to_string())),
//!     Ok(Step::Done("Hello, Baba".to_string()))
//! );
//! ```

mod combinators;
mod descriptor;
mod primitives;

pub use combinators::{AndThen, ComputationExt, Map, OrElse};
pub use descriptor::{Descriptor, Payload, Step};
pub use primitives::{Fail, Perform, Pure, fail, perform, perform_with, pure};

/// The step type produced by a computation `C`.
pub type StepOf<C> = Step<<C as Computation>::Tag, <C as Computation>::Value, <C as Computation>::Output>;

/// The result of driving a computation `C` by one step.
pub type StepResult<C> = Result<StepOf<C>, <C as Computation>::Error>;

/// A type-erased synchronous computation.
pub type BoxComputation<'a, T, V, R, E> =
    Box<dyn Computation<Tag = T, Value = V, Output = R, Error = E> + 'a>;

/// A synchronous resumable computation.
///
/// Implementations are explicit state machines. The driver calls
/// [`start`](Computation::start) exactly once, then alternates between
/// resolving the returned descriptor and calling
/// [`resume`](Computation::resume) (or [`fail`](Computation::fail) when the
/// resolution failed) until the computation completes or fails.
///
/// # Examples
///
/// ```rust
/// use resumable::computation::{Computation, Descriptor, Step};
///
/// /// Suspends for a name unless one was supplied.
/// struct AskName {
///     given: Option<String>,
/// }
///
/// impl Computation for AskName {
///     type Tag = &'static str;
///     type Value = String;
///     type Output = String;
///     type Error = String;
///
///     fn start(&mut self) -> Result<Step<&'static str, String, String>, String> {
///         match self.given.take() {
///             Some(name) => Ok(Step::Done(name)),
///             None => Ok(Step::Suspended(Descriptor::bare("name_missing"))),
///         }
///     }
///
///     fn resume(&mut self, value: Option<String>) -> Result<Step<&'static str, String, String>, String> {
///         value.map(Step::Done).ok_or_else(|| "no name".to_string())
///     }
///
///     fn fail(&mut self, error: String) -> Result<Step<&'static str, String, String>, String> {
///         Err(error)
///     }
/// }
///
/// let mut computation = AskName { given: None };
/// assert!(computation.start().unwrap().is_suspended());
/// assert_eq!(computation.resume(Some("Baba".into())), Ok(Step::Done("Baba".into())));
/// ```
pub trait Computation {
    /// The tag type of the effects this computation raises.
    type Tag;
    /// The type of payload and resumption values.
    type Value;
    /// The result type produced on completion.
    type Output;
    /// The failure type.
    type Error;

    /// Steps the computation with no input.
    ///
    /// # Errors
    ///
    /// Returns the computation's failure if it fails before its first suspension.
    fn start(&mut self) -> Result<Step<Self::Tag, Self::Value, Self::Output>, Self::Error>;

    /// Resumes the computation at its current suspension.
    ///
    /// `None` is the absent marker: the effect was not resolved.
    ///
    /// # Errors
    ///
    /// Returns the computation's failure if it fails before its next suspension.
    fn resume(
        &mut self,
        value: Option<Self::Value>,
    ) -> Result<Step<Self::Tag, Self::Value, Self::Output>, Self::Error>;

    /// Injects a failure at the current suspension.
    ///
    /// The computation may recover and continue; otherwise the failure is
    /// returned as-is.
    ///
    /// # Errors
    ///
    /// Returns the injected failure (or another one) if the computation does
    /// not recover.
    fn fail(
        &mut self,
        error: Self::Error,
    ) -> Result<Step<Self::Tag, Self::Value, Self::Output>, Self::Error>;
}

impl<C: Computation + ?Sized> Computation for Box<C> {
    type Tag = C::Tag;
    type Value = C::Value;
    type Output = C::Output;
    type Error = C::Error;

    #[inline]
    fn start(&mut self) -> Result<Step<Self::Tag, Self::Value, Self::Output>, Self::Error> {
        (**self).start()
    }

    #[inline]
    fn resume(
        &mut self,
        value: Option<Self::Value>,
    ) -> Result<Step<Self::Tag, Self::Value, Self::Output>, Self::Error> {
        (**self).resume(value)
    }

    #[inline]
    fn fail(
        &mut self,
        error: Self::Error,
    ) -> Result<Step<Self::Tag, Self::Value, Self::Output>, Self::Error> {
        (**self).fail(error)
    }
}

impl<C: Computation + ?Sized> Computation for &mut C {
    type Tag = C::Tag;
    type Value = C::Value;
    type Output = C::Output;
    type Error = C::Error;

    #[inline]
    fn start(&mut self) -> Result<Step<Self::Tag, Self::Value, Self::Output>, Self::Error> {
        (**self).start()
    }

    #[inline]
    fn resume(
        &mut self,
        value: Option<Self::Value>,
    ) -> Result<Step<Self::Tag, Self::Value, Self::Output>, Self::Error> {
        (**self).resume(value)
    }

    #[inline]
    fn fail(
        &mut self,
        error: Self::Error,
    ) -> Result<Step<Self::Tag, Self::Value, Self::Output>, Self::Error> {
        (**self).fail(error)
    }
}

/// An asynchronous resumable computation.
///
/// Same protocol as [`Computation`], but each step may await before it
/// suspends or completes. Every [`Computation`] is an `AsyncComputation`,
/// so synchronous computations can be driven by the asynchronous loop.
#[cfg(feature = "async")]
pub trait AsyncComputation {
    /// The tag type of the effects this computation raises.
    type Tag;
    /// The type of payload and resumption values.
    type Value;
    /// The result type produced on completion.
    type Output;
    /// The failure type.
    type Error;

    /// Steps the computation with no input.
    fn start(
        &mut self,
    ) -> impl Future<Output = Result<Step<Self::Tag, Self::Value, Self::Output>, Self::Error>>;

    /// Resumes the computation at its current suspension.
    fn resume(
        &mut self,
        value: Option<Self::Value>,
    ) -> impl Future<Output = Result<Step<Self::Tag, Self::Value, Self::Output>, Self::Error>>;

    /// Injects a failure at the current suspension.
    fn fail(
        &mut self,
        error: Self::Error,
    ) -> impl Future<Output = Result<Step<Self::Tag, Self::Value, Self::Output>, Self::Error>>;
}

#[cfg(feature = "async")]
impl<C: Computation> AsyncComputation for C {
    type Tag = C::Tag;
    type Value = C::Value;
    type Output = C::Output;
    type Error = C::Error;

    #[inline]
    fn start(
        &mut self,
    ) -> impl Future<Output = Result<Step<Self::Tag, Self::Value, Self::Output>, Self::Error>> {
        std::future::ready(Computation::start(self))
    }

    #[inline]
    fn resume(
        &mut self,
        value: Option<Self::Value>,
    ) -> impl Future<Output = Result<Step<Self::Tag, Self::Value, Self::Output>, Self::Error>> {
        std::future::ready(Computation::resume(self, value))
    }

    #[inline]
    fn fail(
        &mut self,
        error: Self::Error,
    ) -> impl Future<Output = Result<Step<Self::Tag, Self::Value, Self::Output>, Self::Error>> {
        std::future::ready(Computation::fail(self, error))
    }
}
