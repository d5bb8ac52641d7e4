//! Synchronous drive loop.

use crate::computation::{Computation, Step};
use crate::handler::Handler;

/// Drives `computation` to completion, resolving each effect with `handler`.
///
/// Only synchronous handlers are accepted; a handler producing a future
/// does not implement [`Handler`] and is rejected at compile time.
///
/// # Errors
///
/// Returns the failure that escapes the computation: one it raises itself,
/// or a handler failure it did not recover from after injection.
///
/// # Examples
///
/// ```rust
/// use resumable::computation::{ComputationExt, perform};
/// use resumable::drive::drive_sync;
/// use resumable::handler::HandlerTable;
///
/// let greeting = perform::<_, String, ()>("name_missing")
///     .map(|name| format!("Hello, {}", name.unwrap_or_default()));
/// let handler = HandlerTable::new().with_value("name_missing", "Baba".to_string());
///
/// assert_eq!(drive_sync(greeting, handler), Ok("Hello, Baba".to_string()));
/// ```
pub fn drive_sync<C, H>(mut computation: C, mut handler: H) -> Result<C::Output, C::Error>
where
    C: Computation,
    H: Handler<C::Tag, C::Value, C::Error>,
{
    let mut step = computation.start().inspect_err(|_| {
        tracing::debug!("computation failed before its first suspension");
    })?;
    let mut suspensions = 0_usize;

    loop {
        match step {
            Step::Done(output) => {
                tracing::debug!(suspensions, "computation completed");
                return Ok(output);
            }
            Step::Suspended(descriptor) => {
                suspensions += 1;
                let resumed = match handler.resolve(&descriptor) {
                    Ok(value) => {
                        tracing::trace!(
                            suspension = suspensions,
                            resolved = value.is_some(),
                            "resuming computation"
                        );
                        computation.resume(value)
                    }
                    Err(error) => {
                        tracing::debug!(
                            suspension = suspensions,
                            "handler failed; injecting failure at suspension"
                        );
                        computation.fail(error)
                    }
                };
                step = resumed.inspect_err(|_| {
                    tracing::debug!(suspension = suspensions, "computation failed");
                })?;
            }
        }
    }
}

/// Drives `computation`, converting an escaping failure with `on_error`.
///
/// This is the only place where a failure turns back into a normal value.
/// If `on_error` itself fails, its failure is returned unchanged.
///
/// # Errors
///
/// Returns the failure produced by `on_error`.
///
/// # Examples
///
/// ```rust
/// use resumable::computation::perform;
/// use resumable::drive::try_drive_sync;
/// use resumable::handler::from_fn;
///
/// let result = try_drive_sync(
///     perform::<_, String, String>("name_missing"),
///     from_fn(|_: &&str, _: &[String]| Err("no terminal".to_string())),
///     |error| Ok::<_, ()>(Some(format!("fallback after {error}"))),
/// );
/// assert_eq!(result, Ok(Some("fallback after no terminal".to_string())));
/// ```
pub fn try_drive_sync<C, H, F, X>(computation: C, handler: H, on_error: F) -> Result<C::Output, X>
where
    C: Computation,
    H: Handler<C::Tag, C::Value, C::Error>,
    F: FnOnce(C::Error) -> Result<C::Output, X>,
{
    drive_sync(computation, handler).or_else(on_error)
}
