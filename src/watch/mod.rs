//! Watch primitives: the completion signal, registration messages, the token
//! binding a guard to a monitor queue, and the scoped [`Watchdog`] guard.
//!
//! Invariants kept here:
//! - a signal is cleared before its registration is enqueued;
//! - a guard raises its signal on every exit path of the guarded section;
//! - a registration is consumed exactly once and never re-enqueued.

mod guard;
mod registration;
mod signal;
mod token;

pub use guard::{WatchGuard, Watchdog};

pub(crate) use registration::{MonitorMessage, Registration};
pub(crate) use signal::CompletionSignal;
pub(crate) use token::WatchToken;
