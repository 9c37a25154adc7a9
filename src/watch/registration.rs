//! # Registration messages carried on a monitor queue.
//!
//! A [`Registration`] describes one in-flight operation to watch: the waiter
//! half of its completion signal plus the channel/method names that identify
//! it in diagnostics. A registration is created by a guard on acquisition and
//! consumed exactly once by the monitor loop; it is never re-enqueued.
//!
//! [`MonitorMessage`] is the queue's wire type. The shutdown sentinel is a
//! dedicated variant rather than an in-band null, so the monitor loop's match
//! is exhaustive and a sentinel can never be confused with a registration.

use std::sync::Arc;

use super::signal::CompletionWaiter;

/// A request to begin watching one in-flight operation.
#[derive(Debug)]
pub struct Registration {
    /// Waiter half of the operation's completion signal.
    pub waiter: CompletionWaiter,
    /// Name of the channel the operation runs on.
    pub channel_name: Arc<str>,
    /// Kind of method being watched (e.g. `send`, `recv`).
    pub method_type: Arc<str>,
}

/// Message consumed by a monitor loop.
#[derive(Debug)]
pub enum MonitorMessage {
    /// Dispatch a watcher task for this registration.
    Watch(Registration),
    /// Sentinel: stop accepting registrations and drain pending watchers.
    ///
    /// Always the last message a monitor loop acts on.
    Shutdown,
}
