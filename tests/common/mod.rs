//! Greeting computations shared by the integration tests.
//!
//! `FormatName` raises `first_name_missing` and `last_name_missing` for
//! whichever part of the name was not supplied. `greet` embeds it and
//! prefixes the formatted name.

#![allow(dead_code)]

use resumable::computation::{Computation, ComputationExt, Descriptor, Map, Step};

pub const FIRST_NAME_MISSING: &str = "first_name_missing";
pub const LAST_NAME_MISSING: &str = "last_name_missing";

pub type Tag = &'static str;

/// Errors raised by the test computations and handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GreetError {
    Boom,
    Handler(String),
    MissingName(Tag),
}

enum FormatNameState {
    Start {
        first: Option<String>,
        last: Option<String>,
    },
    AwaitingFirst {
        last: Option<String>,
    },
    AwaitingLast {
        first: String,
    },
    Finished,
}

/// Formats "first last", asking for each missing part.
pub struct FormatName {
    state: FormatNameState,
    initial: bool,
}

impl FormatName {
    pub fn new(first: Option<&str>, last: Option<&str>) -> Self {
        Self {
            state: FormatNameState::Start {
                first: first.map(str::to_string),
                last: last.map(str::to_string),
            },
            initial: false,
        }
    }

    /// Uses the first letter of the first name: "B. Voss".
    pub fn initial(first: Option<&str>, last: Option<&str>) -> Self {
        Self {
            initial: true,
            ..Self::new(first, last)
        }
    }

    fn with_first(&mut self, first: String, last: Option<String>) -> Step<Tag, String, String> {
        match last {
            Some(last) => self.finish(&first, &last),
            None => {
                self.state = FormatNameState::AwaitingLast { first };
                Step::Suspended(Descriptor::bare(LAST_NAME_MISSING))
            }
        }
    }

    fn finish(&mut self, first: &str, last: &str) -> Step<Tag, String, String> {
        self.state = FormatNameState::Finished;
        if self.initial {
            let letter: String = first.chars().take(1).collect();
            Step::Done(format!("{letter}. {last}"))
        } else {
            Step::Done(format!("{first} {last}"))
        }
    }
}

impl Computation for FormatName {
    type Tag = Tag;
    type Value = String;
    type Output = String;
    type Error = GreetError;

    fn start(&mut self) -> Result<Step<Tag, String, String>, GreetError> {
        match std::mem::replace(&mut self.state, FormatNameState::Finished) {
            FormatNameState::Start {
                first: Some(first),
                last,
            } => Ok(self.with_first(first, last)),
            FormatNameState::Start { first: None, last } => {
                self.state = FormatNameState::AwaitingFirst { last };
                Ok(Step::Suspended(Descriptor::bare(FIRST_NAME_MISSING)))
            }
            _ => panic!("FormatName started twice"),
        }
    }

    fn resume(&mut self, value: Option<String>) -> Result<Step<Tag, String, String>, GreetError> {
        match std::mem::replace(&mut self.state, FormatNameState::Finished) {
            FormatNameState::AwaitingFirst { last } => {
                let first = value.ok_or(GreetError::MissingName(FIRST_NAME_MISSING))?;
                Ok(self.with_first(first, last))
            }
            FormatNameState::AwaitingLast { first } => {
                let last = value.ok_or(GreetError::MissingName(LAST_NAME_MISSING))?;
                Ok(self.finish(&first, &last))
            }
            _ => panic!("FormatName resumed without an outstanding suspension"),
        }
    }

    fn fail(&mut self, error: GreetError) -> Result<Step<Tag, String, String>, GreetError> {
        self.state = FormatNameState::Finished;
        Err(error)
    }
}

/// Greets a person, delegating the name to `FormatName`.
pub fn greet(
    first: Option<&str>,
    last: Option<&str>,
) -> Map<FormatName, impl FnOnce(String) -> String + use<>> {
    FormatName::new(first, last).map(|name| format!("Hello, {name}"))
}

/// Greets a person by initial, delegating the name to `FormatName`.
pub fn greet_initial(
    first: Option<&str>,
    last: Option<&str>,
) -> Map<FormatName, impl FnOnce(String) -> String + use<>> {
    FormatName::initial(first, last).map(|name| format!("Hello, {name}"))
}

/// Fails before raising any effect.
pub struct Explodes;

impl Computation for Explodes {
    type Tag = Tag;
    type Value = String;
    type Output = String;
    type Error = GreetError;

    fn start(&mut self) -> Result<Step<Tag, String, String>, GreetError> {
        Err(GreetError::Boom)
    }

    fn resume(&mut self, _: Option<String>) -> Result<Step<Tag, String, String>, GreetError> {
        panic!("Explodes resumed")
    }

    fn fail(&mut self, error: GreetError) -> Result<Step<Tag, String, String>, GreetError> {
        Err(error)
    }
}
