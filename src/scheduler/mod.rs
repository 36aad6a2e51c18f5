//! Deferred work for the state machine.
//!
//! The mismatch pause is modelled as a cancellable scheduled task, not a
//! timer: `DeferredQueue` keeps a logical clock and an epoch counter, and
//! the session bumps the epoch on every reset.

mod deferred;

pub use deferred::{DeferredQueue, DeferredTask, TaskHandle, TaskKind};
