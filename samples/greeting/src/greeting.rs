//! Greeting computations.

use resumable::computation::{BoxComputation, Computation, ComputationExt, fail, perform, pure};
use thiserror::Error;

/// Effects raised while building a greeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GreetingEffect {
    FirstNameMissing,
    LastNameMissing,
    DispositionMissing,
}

impl GreetingEffect {
    /// The question shown when the effect is answered interactively.
    pub const fn question(self) -> &'static str {
        match self {
            Self::FirstNameMissing => "First Name: ",
            Self::LastNameMissing => "Last Name: ",
            Self::DispositionMissing => "Disposition: ",
        }
    }
}

/// Errors raised while building a greeting.
#[derive(Debug, Error)]
pub enum GreetingError {
    #[error("no answer for {0:?}")]
    Unanswered(GreetingEffect),

    #[error("failed to read an answer: {0}")]
    Prompt(#[from] std::io::Error),
}

type Answer<R> = BoxComputation<'static, GreetingEffect, String, R, GreetingError>;

/// Uses `known` if present, otherwise raises `effect`.
///
/// An unanswered effect is a failure.
fn ask(known: Option<String>, effect: GreetingEffect) -> Answer<String> {
    match known {
        Some(value) => pure(value).boxed(),
        None => perform(effect)
            .and_then(move |answer| match answer {
                Some(value) => pure(value).boxed(),
                None => fail(GreetingError::Unanswered(effect)).boxed(),
            })
            .boxed(),
    }
}

/// Formats "first last", raising an effect for each missing part.
pub fn format_name(
    first: Option<String>,
    last: Option<String>,
) -> impl Computation<Tag = GreetingEffect, Value = String, Output = String, Error = GreetingError>
{
    ask(first, GreetingEffect::FirstNameMissing).and_then(move |first| {
        ask(last, GreetingEffect::LastNameMissing).map(move |last| format!("{first} {last}"))
    })
}

/// Greets a person, delegating the name to [`format_name`].
///
/// A `"hostile"` disposition turns the greeting away.
pub fn greet(
    (first, last, disposition): (Option<String>, Option<String>, Option<String>),
) -> impl Computation<Tag = GreetingEffect, Value = String, Output = String, Error = GreetingError>
{
    format_name(first, last).and_then(move |name| {
        ask(disposition, GreetingEffect::DispositionMissing).map(move |disposition| {
            if disposition == "hostile" {
                format!("Go away, {name}.")
            } else {
                format!("Hello, {name}!")
            }
        })
    })
}
