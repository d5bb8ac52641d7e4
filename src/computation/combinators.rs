//! Delegation combinators.
//!
//! Each combinator embeds one computation inside another. Every suspension
//! of the embedded computation surfaces unchanged to whoever drives the
//! combined computation, and every resumption is forwarded back to it.
//!
//! # Examples
//!
//! ```rust
//! use resumable::computation::{ComputationExt, perform};
//! use resumable::drive::drive_sync;
//! use resumable::handler::HandlerTable;
//!
//! let greeting = perform::<_, String, ()>("first_name_missing")
//!     .and_then(|first| {
//!         perform("last_name_missing").map(move |last| {
//!             format!("Hello, {} {}", first.unwrap_or_default(), last.unwrap_or_default())
//!         })
//!     });
//!
//! let handler = HandlerTable::new()
//!     .with_value("first_name_missing", "Baba".to_string())
//!     .with_value("last_name_missing", "Voss".to_string());
//!
//! assert_eq!(drive_sync(greeting, handler), Ok("Hello, Baba Voss".to_string()));
//! ```

use super::{BoxComputation, Computation, Step};
use crate::binding::{AlwaysSync, Bindings, BoundSync};
use crate::handler::Handler;

/// Extension methods for building computations out of other computations.
pub trait ComputationExt: Computation + Sized {
    /// Transforms the result of this computation once it completes.
    fn map<R, F>(self, function: F) -> Map<Self, F>
    where
        F: FnOnce(Self::Output) -> R,
    {
        Map {
            computation: self,
            function: Some(function),
        }
    }

    /// Continues with the computation built from this computation's result.
    ///
    /// Suspensions of both computations surface in order.
    fn and_then<D, F>(self, function: F) -> AndThen<Self, F, D>
    where
        D: Computation<Tag = Self::Tag, Value = Self::Value, Error = Self::Error>,
        F: FnOnce(Self::Output) -> D,
    {
        AndThen {
            state: AndThenState::First {
                computation: self,
                continuation: Some(function),
            },
        }
    }

    /// Recovers from a failure that escapes this computation.
    ///
    /// Acts as a failure boundary around the embedded computation: a failure
    /// it raises, or one injected at its suspension that it does not handle,
    /// switches to the computation built by `function`.
    fn or_else<D, F>(self, function: F) -> OrElse<Self, F, D>
    where
        D: Computation<Tag = Self::Tag, Value = Self::Value, Output = Self::Output, Error = Self::Error>,
        F: FnOnce(Self::Error) -> D,
    {
        OrElse {
            state: OrElseState::Guarded {
                computation: self,
                recovery: Some(function),
            },
        }
    }

    /// Erases the concrete type of this computation.
    fn boxed<'a>(self) -> BoxComputation<'a, Self::Tag, Self::Value, Self::Output, Self::Error>
    where
        Self: 'a,
    {
        Box::new(self)
    }

    /// Pre-resolves the effects `bindings` answers; see [`BoundSync`].
    fn with_bindings<B>(self, bindings: B) -> BoundSync<Self, B>
    where
        B: Handler<Self::Tag, Self::Value, Self::Error>,
    {
        BoundSync::new(self, bindings)
    }

    /// Pre-resolves the effects present in `bindings`; see [`AlwaysSync`].
    fn with_mandatory_bindings(
        self,
        bindings: Bindings<Self::Tag, Self::Value>,
    ) -> AlwaysSync<Self, Self::Tag, Self::Value>
    where
        Self::Tag: Eq + std::hash::Hash,
        Self::Value: Clone,
    {
        AlwaysSync::new(self, bindings)
    }
}

impl<C: Computation> ComputationExt for C {}

/// Computation returned by [`ComputationExt::map`].
#[derive(Debug)]
pub struct Map<C, F> {
    computation: C,
    function: Option<F>,
}

impl<C, F> Map<C, F>
where
    C: Computation,
{
    fn finish<R>(&mut self, step: Step<C::Tag, C::Value, C::Output>) -> Step<C::Tag, C::Value, R>
    where
        F: FnOnce(C::Output) -> R,
    {
        step.map_done(|output| {
            let function = self.function.take().expect("Map completed more than once");
            function(output)
        })
    }
}

impl<C, F, R> Computation for Map<C, F>
where
    C: Computation,
    F: FnOnce(C::Output) -> R,
{
    type Tag = C::Tag;
    type Value = C::Value;
    type Output = R;
    type Error = C::Error;

    fn start(&mut self) -> Result<Step<C::Tag, C::Value, R>, C::Error> {
        let step = self.computation.start()?;
        Ok(self.finish(step))
    }

    fn resume(&mut self, value: Option<C::Value>) -> Result<Step<C::Tag, C::Value, R>, C::Error> {
        let step = self.computation.resume(value)?;
        Ok(self.finish(step))
    }

    fn fail(&mut self, error: C::Error) -> Result<Step<C::Tag, C::Value, R>, C::Error> {
        let step = self.computation.fail(error)?;
        Ok(self.finish(step))
    }
}

#[derive(Debug)]
enum AndThenState<C, F, D> {
    First { computation: C, continuation: Option<F> },
    Second(D),
}

/// Computation returned by [`ComputationExt::and_then`].
#[derive(Debug)]
pub struct AndThen<C, F, D> {
    state: AndThenState<C, F, D>,
}

impl<C, F, D> AndThen<C, F, D>
where
    C: Computation,
    D: Computation<Tag = C::Tag, Value = C::Value, Error = C::Error>,
    F: FnOnce(C::Output) -> D,
{
    /// Hands over to the second computation when the first one completes.
    fn advance(
        &mut self,
        step: Step<C::Tag, C::Value, C::Output>,
    ) -> Result<Step<D::Tag, D::Value, D::Output>, D::Error> {
        match step {
            Step::Suspended(descriptor) => Ok(Step::Suspended(descriptor)),
            Step::Done(output) => {
                let AndThenState::First { continuation, .. } = &mut self.state else {
                    unreachable!("first computation completed after hand-over")
                };
                let continuation = continuation
                    .take()
                    .expect("AndThen continuation invoked more than once");
                let mut next = continuation(output);
                let step = next.start();
                self.state = AndThenState::Second(next);
                step
            }
        }
    }
}

impl<C, F, D> Computation for AndThen<C, F, D>
where
    C: Computation,
    D: Computation<Tag = C::Tag, Value = C::Value, Error = C::Error>,
    F: FnOnce(C::Output) -> D,
{
    type Tag = D::Tag;
    type Value = D::Value;
    type Output = D::Output;
    type Error = D::Error;

    fn start(&mut self) -> Result<Step<D::Tag, D::Value, D::Output>, D::Error> {
        match &mut self.state {
            AndThenState::First { computation, .. } => {
                let step = computation.start()?;
                self.advance(step)
            }
            AndThenState::Second(next) => next.start(),
        }
    }

    fn resume(
        &mut self,
        value: Option<D::Value>,
    ) -> Result<Step<D::Tag, D::Value, D::Output>, D::Error> {
        match &mut self.state {
            AndThenState::First { computation, .. } => {
                let step = computation.resume(value)?;
                self.advance(step)
            }
            AndThenState::Second(next) => next.resume(value),
        }
    }

    fn fail(&mut self, error: D::Error) -> Result<Step<D::Tag, D::Value, D::Output>, D::Error> {
        match &mut self.state {
            AndThenState::First { computation, .. } => {
                let step = computation.fail(error)?;
                self.advance(step)
            }
            AndThenState::Second(next) => next.fail(error),
        }
    }
}

#[derive(Debug)]
enum OrElseState<C, F, D> {
    Guarded { computation: C, recovery: Option<F> },
    Recovering(D),
}

/// Computation returned by [`ComputationExt::or_else`].
#[derive(Debug)]
pub struct OrElse<C, F, D> {
    state: OrElseState<C, F, D>,
}

impl<C, F, D> OrElse<C, F, D>
where
    C: Computation,
    D: Computation<Tag = C::Tag, Value = C::Value, Output = C::Output, Error = C::Error>,
    F: FnOnce(C::Error) -> D,
{
    /// Switches to the recovery computation when the guarded one fails.
    fn settle(
        &mut self,
        step: Result<Step<C::Tag, C::Value, C::Output>, C::Error>,
    ) -> Result<Step<C::Tag, C::Value, C::Output>, C::Error> {
        match step {
            Ok(step) => Ok(step),
            Err(error) => {
                let OrElseState::Guarded { recovery, .. } = &mut self.state else {
                    unreachable!("guarded computation failed after recovery")
                };
                let recovery = recovery.take().expect("OrElse recovery invoked more than once");
                tracing::trace!("failure boundary switching to recovery computation");
                let mut next = recovery(error);
                let step = next.start();
                self.state = OrElseState::Recovering(next);
                step
            }
        }
    }
}

impl<C, F, D> Computation for OrElse<C, F, D>
where
    C: Computation,
    D: Computation<Tag = C::Tag, Value = C::Value, Output = C::Output, Error = C::Error>,
    F: FnOnce(C::Error) -> D,
{
    type Tag = C::Tag;
    type Value = C::Value;
    type Output = C::Output;
    type Error = C::Error;

    fn start(&mut self) -> Result<Step<C::Tag, C::Value, C::Output>, C::Error> {
        match &mut self.state {
            OrElseState::Guarded { computation, .. } => {
                let step = computation.start();
                self.settle(step)
            }
            OrElseState::Recovering(next) => next.start(),
        }
    }

    fn resume(
        &mut self,
        value: Option<C::Value>,
    ) -> Result<Step<C::Tag, C::Value, C::Output>, C::Error> {
        match &mut self.state {
            OrElseState::Guarded { computation, .. } => {
                let step = computation.resume(value);
                self.settle(step)
            }
            OrElseState::Recovering(next) => next.resume(value),
        }
    }

    fn fail(&mut self, error: C::Error) -> Result<Step<C::Tag, C::Value, C::Output>, C::Error> {
        match &mut self.state {
            OrElseState::Guarded { computation, .. } => {
                let step = computation.fail(error);
                self.settle(step)
            }
            OrElseState::Recovering(next) => next.fail(error),
        }
    }
}
