//! Asynchronous drive loop.

use crate::computation::{AsyncComputation, Step};
use crate::handler::AsyncHandler;

/// Drives `computation` to completion, awaiting each resolution from `handler`.
///
/// Steps of the computation and resolutions of the handler may both await;
/// while they do, the executor is free to run unrelated work. The
/// computation is never stepped while a resolution is pending.
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
/// use resumable::drive::drive_async;
/// use resumable::handler::from_async_fn;
///
/// let greeting = perform::<_, String, ()>("name_missing")
///     .map(|name| format!("Hello, {}", name.unwrap_or_default()));
/// let handler = from_async_fn(|_: &&str, _: &[String]| async { Ok(Some("Baba".to_string())) });
///
/// let result = futures::executor::block_on(drive_async(greeting, handler));
/// assert_eq!(result, Ok("Hello, Baba".to_string()));
/// ```
pub async fn drive_async<C, H>(mut computation: C, mut handler: H) -> Result<C::Output, C::Error>
where
    C: AsyncComputation,
    H: AsyncHandler<C::Tag, C::Value, C::Error>,
{
    let mut step = computation.start().await.inspect_err(|_| {
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
                let resolution = handler.resolve(&descriptor).await;
                let resumed = match resolution {
                    Ok(value) => {
                        tracing::trace!(
                            suspension = suspensions,
                            resolved = value.is_some(),
                            "resuming computation"
                        );
                        computation.resume(value).await
                    }
                    Err(error) => {
                        tracing::debug!(
                            suspension = suspensions,
                            "handler failed; injecting failure at suspension"
                        );
                        computation.fail(error).await
                    }
                };
                step = resumed.inspect_err(|_| {
                    tracing::debug!(suspension = suspensions, "computation failed");
                })?;
            }
        }
    }
}

/// Drives `computation` asynchronously, converting an escaping failure with
/// `on_error`.
///
/// If `on_error` itself fails, its failure is returned unchanged.
///
/// # Errors
///
/// Returns the failure produced by `on_error`.
pub async fn try_drive_async<C, H, F, X>(
    computation: C,
    handler: H,
    on_error: F,
) -> Result<C::Output, X>
where
    C: AsyncComputation,
    H: AsyncHandler<C::Tag, C::Value, C::Error>,
    F: FnOnce(C::Error) -> Result<C::Output, X>,
{
    drive_async(computation, handler).await.or_else(on_error)
}
