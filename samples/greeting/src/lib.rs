//! Greeting sample built on resumable effect handlers.
//!
//! `greet` never reads from the terminal itself. It raises
//! [`GreetingEffect`]s for whatever it was not given, and the driver decides
//! how they are answered: by a [`Prompt`], by a table, or by bindings
//! attached to the constructor.

pub mod greeting;
pub mod prompt;

pub use greeting::{GreetingEffect, GreetingError, format_name, greet};
pub use prompt::{Prompt, Terminal, prompt_handler};
