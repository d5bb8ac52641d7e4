//! Primitive computations.
//!
//! - [`perform`] / [`perform_with`]: suspend once and complete with the
//!   resumption value
//! - [`pure`]: complete immediately
//! - [`fail`]: fail immediately
//!
//! Larger computations are assembled from these with the combinators in
//! [`ComputationExt`](super::ComputationExt), or written by hand as state
//! machines implementing [`Computation`].

use std::marker::PhantomData;

use super::{Computation, Descriptor, Step};

#[derive(Debug)]
enum PerformState<T, V> {
    Ready(Descriptor<T, V>),
    Suspended,
    Finished,
}

/// A computation that raises exactly one effect.
///
/// Completes with the resumption value, which is `None` when the effect
/// was left unresolved by the driver.
///
/// Created by [`perform`] and [`perform_with`].
///
/// # Panics
///
/// Starting it twice, or resuming it when it is not suspended, panics.
#[derive(Debug)]
pub struct Perform<T, V, E> {
    state: PerformState<T, V>,
    _error: PhantomData<fn() -> E>,
}

/// Raises the effect `tag` with no payload.
///
/// # Examples
///
/// ```rust
/// use resumable::computation::perform;
/// use resumable::drive::drive_sync;
/// use resumable::handler::from_fn;
///
/// let answer = drive_sync(
///     perform::<_, i32, ()>("answer"),
///     from_fn(|_tag: &&str, _payload: &[i32]| Ok(Some(42))),
/// );
/// assert_eq!(answer, Ok(Some(42)));
/// ```
#[must_use]
pub fn perform<T, V, E>(tag: T) -> Perform<T, V, E> {
    perform_with(Descriptor::bare(tag))
}

/// Raises the effect described by `descriptor`, payload included.
#[must_use]
pub const fn perform_with<T, V, E>(descriptor: Descriptor<T, V>) -> Perform<T, V, E> {
    Perform {
        state: PerformState::Ready(descriptor),
        _error: PhantomData,
    }
}

impl<T, V, E> Computation for Perform<T, V, E> {
    type Tag = T;
    type Value = V;
    type Output = Option<V>;
    type Error = E;

    fn start(&mut self) -> Result<Step<T, V, Option<V>>, E> {
        match std::mem::replace(&mut self.state, PerformState::Suspended) {
            PerformState::Ready(descriptor) => Ok(Step::Suspended(descriptor)),
            PerformState::Suspended | PerformState::Finished => {
                panic!("Perform started more than once")
            }
        }
    }

    fn resume(&mut self, value: Option<V>) -> Result<Step<T, V, Option<V>>, E> {
        match std::mem::replace(&mut self.state, PerformState::Finished) {
            PerformState::Suspended => Ok(Step::Done(value)),
            PerformState::Ready(_) | PerformState::Finished => {
                panic!("Perform resumed without an outstanding suspension")
            }
        }
    }

    fn fail(&mut self, error: E) -> Result<Step<T, V, Option<V>>, E> {
        self.state = PerformState::Finished;
        Err(error)
    }
}

/// A computation that completes immediately with a value.
///
/// Created by [`pure`].
#[derive(Debug)]
pub struct Pure<T, V, R, E> {
    value: Option<R>,
    _phantom: PhantomData<fn() -> (T, V, E)>,
}

/// Completes immediately with `value`, raising no effects.
#[must_use]
pub const fn pure<T, V, R, E>(value: R) -> Pure<T, V, R, E> {
    Pure {
        value: Some(value),
        _phantom: PhantomData,
    }
}

impl<T, V, R, E> Computation for Pure<T, V, R, E> {
    type Tag = T;
    type Value = V;
    type Output = R;
    type Error = E;

    fn start(&mut self) -> Result<Step<T, V, R>, E> {
        Ok(Step::Done(
            self.value.take().expect("Pure started more than once"),
        ))
    }

    fn resume(&mut self, _value: Option<V>) -> Result<Step<T, V, R>, E> {
        panic!("Pure resumed without an outstanding suspension")
    }

    fn fail(&mut self, error: E) -> Result<Step<T, V, R>, E> {
        Err(error)
    }
}

/// A computation that fails as soon as it is started.
///
/// Created by [`fail`].
#[derive(Debug)]
pub struct Fail<T, V, R, E> {
    error: Option<E>,
    _phantom: PhantomData<fn() -> (T, V, R)>,
}

/// Fails immediately with `error`, before any suspension.
#[must_use]
pub const fn fail<T, V, R, E>(error: E) -> Fail<T, V, R, E> {
    Fail {
        error: Some(error),
        _phantom: PhantomData,
    }
}

impl<T, V, R, E> Computation for Fail<T, V, R, E> {
    type Tag = T;
    type Value = V;
    type Output = R;
    type Error = E;

    fn start(&mut self) -> Result<Step<T, V, R>, E> {
        Err(self.error.take().expect("Fail started more than once"))
    }

    fn resume(&mut self, _value: Option<V>) -> Result<Step<T, V, R>, E> {
        panic!("Fail resumed without an outstanding suspension")
    }

    fn fail(&mut self, error: E) -> Result<Step<T, V, R>, E> {
        Err(error)
    }
}
