//! Answering greeting effects interactively.

use std::io;

use resumable::handler::{AsyncHandler, from_async_fn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use tokio::sync::Mutex;

use crate::greeting::{GreetingEffect, GreetingError};

/// Asks a question and waits for a single-line answer.
pub trait Prompt {
    fn ask(&self, question: &str) -> impl Future<Output = io::Result<String>>;
}

/// A [`Prompt`] reading answers from standard input.
pub struct Terminal {
    input: Mutex<BufReader<Stdin>>,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            input: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for Terminal {
    async fn ask(&self, question: &str) -> io::Result<String> {
        let mut output = tokio::io::stdout();
        output.write_all(question.as_bytes()).await?;
        output.flush().await?;

        let mut line = String::new();
        self.input.lock().await.read_line(&mut line).await?;
        Ok(line)
    }
}

async fn answer<P: Prompt>(
    prompt: &P,
    effect: GreetingEffect,
) -> Result<Option<String>, GreetingError> {
    let line = prompt.ask(effect.question()).await?;
    let line = line.trim();
    tracing::debug!(?effect, answered = !line.is_empty(), "prompt answered");
    Ok((!line.is_empty()).then(|| line.to_string()))
}

/// Answers every effect by asking `prompt`.
///
/// A blank answer leaves the effect unresolved.
pub fn prompt_handler<P: Prompt>(
    prompt: &P,
) -> impl AsyncHandler<GreetingEffect, String, GreetingError> + '_ {
    from_async_fn(move |effect: &GreetingEffect, _: &[String]| answer(prompt, *effect))
}
