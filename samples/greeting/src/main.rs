//! greeting
//!
//! Greets Voss, asking on the terminal for whatever is missing.
//!
//! The disposition is pre-bound to `"hostile"`, so it is never asked for,
//! even though the driver would answer it. A failed greeting falls back to
//! a generic one.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=resumable=trace cargo run --bin greeting
//! ```

use std::convert::Infallible;

use greeting_sample::{GreetingEffect, Terminal, greet, prompt_handler};
use resumable::binding::bind;
use resumable::drive::try_drive_async;
use resumable::handler::HandlerTable;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "greeting=info,resumable=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let hostile_greet = bind(
        greet,
        HandlerTable::new().with_value(GreetingEffect::DispositionMissing, "hostile".to_string()),
    );
    let terminal = Terminal::new();

    let Ok(greeting) = try_drive_async(
        hostile_greet((None, Some("Voss".to_string()), None)),
        prompt_handler(&terminal),
        |error| {
            tracing::error!(%error, "greeting failed");
            Ok::<_, Infallible>("Hello, whoever you are.".to_string())
        },
    )
    .await;

    println!("{greeting}");
}
