//! # resumable
//!
//! Effect handlers for resumable computations.
//!
//! ## Overview
//!
//! A computation declares *effects*, named requests for externally supplied
//! values, without knowing how they will be satisfied. It suspends at each
//! effect with a descriptor; a driver resolves the descriptor with a handler
//! and resumes the computation with the value. This separates control logic
//! ("I need a first name") from the policy that supplies it (ask the user,
//! return a constant, delegate further).
//!
//! - **Computations**: the `start` / `resume` / `fail` protocol, primitives
//!   and delegation combinators
//! - **Handlers**: function, keyed-table and absent handler shapes
//! - **Drive loops**: synchronous and asynchronous, with guarded variants
//! - **Bindings**: pre-resolving effects before a computation is driven
//!
//! ## Feature Flags
//!
//! - `async`: asynchronous computations, handlers, drive loops and bindings
//!   (enabled by default)
//! - `serde`: `Serialize` / `Deserialize` for descriptors and steps
//! - `fxhash`: back keyed tables with `FxHashMap`
//! - `full`: enable all features
//!
//! ## Example
//!
//! ```rust
//! use resumable::prelude::*;
//!
//! let greeting = perform::<_, String, ()>("first_name_missing")
//!     .and_then(|first| {
//!         perform("last_name_missing").map(move |last| {
//!             format!("Hello, {} {}", first.unwrap_or_default(), last.unwrap_or_default())
//!         })
//!     })
//!     .with_bindings(HandlerTable::new().with_value("first_name_missing", "Toodle".to_string()));
//!
//! let handler = HandlerTable::new()
//!     .with_value("first_name_missing", "Beebop".to_string())
//!     .with_value("last_name_missing", "Deedoo".to_string());
//!
//! assert_eq!(drive_sync(greeting, handler), Ok("Hello, Toodle Deedoo".to_string()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the drive functions, the computation and handler traits and
/// the common adapters. The asynchronous traits are not re-exported, so
/// their method names never clash with the synchronous ones.
///
/// # Usage
///
/// ```rust
/// use resumable::prelude::*;
/// ```
pub mod prelude {
    pub use crate::binding::{Bindings, BoundSync, always_sync, bind_sync};
    pub use crate::computation::{
        Computation, ComputationExt, Descriptor, Step, fail, perform, perform_with, pure,
    };
    pub use crate::drive::{drive_sync, try_drive_sync};
    pub use crate::error::UnhandledEffectError;
    pub use crate::handler::{Handler, HandlerTable, Unhandled, from_fn, strict};

    #[cfg(feature = "async")]
    pub use crate::binding::{Always, Bound, always, bind};
    #[cfg(feature = "async")]
    pub use crate::drive::{drive_async, try_drive_async};
    #[cfg(feature = "async")]
    pub use crate::handler::{AsyncHandlerTable, from_async_fn};
}

pub mod binding;
pub mod computation;
pub mod drive;
pub mod error;
pub mod handler;
