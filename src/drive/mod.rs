//! Drive loops.
//!
//! Driving steps a computation to each suspension, resolves the suspension
//! with a handler, and resumes the computation with the result until it
//! completes or fails.
//!
//! - [`drive_sync`] / [`drive_async`]: propagate the computation's failure
//! - [`try_drive_sync`] / [`try_drive_async`]: convert a propagated failure
//!   into a result with a caller-supplied fallback
//!
//! # Ordering
//!
//! Exactly one suspension is outstanding at a time. Effects are resolved in
//! the order the computation raises them, and the computation is not
//! stepped again until the current resolution has produced a value.
//!
//! # Failure Injection
//!
//! When a handler fails, the failure is injected into the computation at
//! the current suspension with [`Computation::fail`](crate::computation::Computation::fail).
//! A computation that recovers keeps being driven; one that does not
//! propagates the failure to the caller.
//!
//! # Examples
//!
//! ```rust
//! use resumable::computation::{ComputationExt, fail, perform};
//! use resumable::drive::{drive_sync, try_drive_sync};
//! use resumable::handler::Unhandled;
//!
//! let failing = fail::<&str, String, String, _>("boom".to_string());
//! assert_eq!(drive_sync(failing, Unhandled), Err("boom".to_string()));
//!
//! let failing = fail::<&str, String, String, _>("boom".to_string());
//! let recovered = try_drive_sync(failing, Unhandled, |_| {
//!     Ok::<_, std::convert::Infallible>("fallback".to_string())
//! });
//! assert_eq!(recovered, Ok("fallback".to_string()));
//! ```

#[cfg(feature = "async")]
mod async_drive;
mod sync_drive;

#[cfg(feature = "async")]
pub use async_drive::{drive_async, try_drive_async};
pub use sync_drive::{drive_sync, try_drive_sync};
