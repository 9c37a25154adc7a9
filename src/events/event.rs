//! # Runtime events emitted by the monitor loops and watcher tasks.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Watch lifecycle**: one registration's flow (registered, block detected, completed)
//! - **Monitor lifecycle**: loop startup, sentinel receipt, final drain
//!
//! The [`Event`] struct carries additional metadata such as timestamps,
//! channel/method names, the timeout class, and miss counts.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Events for a single registration are ordered; events across
//! different registrations are not ordered relative to each other because
//! watcher tasks run concurrently.
//!
//! ## Example
//! ```rust
//! use stallwatch::{ChannelClass, Event, EventKind};
//!
//! let ev = Event::now(EventKind::BlockDetected)
//!     .with_channel("spike-bus")
//!     .with_method("recv")
//!     .with_class(ChannelClass::Short)
//!     .with_misses(2);
//!
//! assert_eq!(ev.kind, EventKind::BlockDetected);
//! assert_eq!(ev.channel.as_deref(), Some("spike-bus"));
//! assert_eq!(ev.misses, Some(2));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::config::ChannelClass;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Monitor lifecycle ===
    /// A monitor loop started polling its queue.
    ///
    /// Sets:
    /// - `class`: timeout class the loop is bound to
    /// - `timeout_ms`: the loop's timeout value
    MonitorStarted,

    /// A monitor loop received its shutdown sentinel and stopped accepting
    /// new registrations. Pending watcher tasks keep running.
    ///
    /// Sets:
    /// - `class`: timeout class
    MonitorDraining,

    /// A monitor loop finished: the sentinel arrived and every pending
    /// watcher task has exited.
    ///
    /// Sets:
    /// - `class`: timeout class
    MonitorStopped,

    // === Watch lifecycle ===
    /// A registration was dequeued and a watcher task dispatched for it.
    ///
    /// Sets:
    /// - `channel`: channel name from the registration
    /// - `method`: method kind from the registration
    /// - `class`: timeout class
    WatchRegistered,

    /// A watcher's wait elapsed without the guarded section completing.
    ///
    /// Emitted once per elapsed timeout interval, alongside the stdout
    /// diagnostic line.
    ///
    /// Sets:
    /// - `channel`: channel name
    /// - `method`: method kind
    /// - `misses`: how many waits have elapsed so far (1-based)
    BlockDetected,

    /// A watcher observed its completion signal and exited.
    ///
    /// Sets:
    /// - `channel`: channel name
    /// - `method`: method kind
    /// - `misses`: total elapsed waits before completion (0 = never blocked)
    WatchCompleted,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Channel name of the watched section, if applicable.
    pub channel: Option<Arc<str>>,
    /// Method kind of the watched section, if applicable.
    pub method: Option<Arc<str>>,
    /// Timeout class, if applicable.
    pub class: Option<ChannelClass>,
    /// Timeout value in milliseconds (compact), if applicable.
    pub timeout_ms: Option<u32>,
    /// Number of elapsed waits, if applicable.
    pub misses: Option<u32>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            channel: None,
            method: None,
            class: None,
            timeout_ms: None,
            misses: None,
        }
    }

    /// Attaches a channel name.
    #[inline]
    pub fn with_channel(mut self, channel: impl Into<Arc<str>>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Attaches a method kind.
    #[inline]
    pub fn with_method(mut self, method: impl Into<Arc<str>>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Attaches a timeout class.
    #[inline]
    pub fn with_class(mut self, class: ChannelClass) -> Self {
        self.class = Some(class);
        self
    }

    /// Attaches a timeout value (stored as milliseconds).
    #[inline]
    pub fn with_timeout(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.timeout_ms = Some(ms);
        self
    }

    /// Attaches an elapsed-wait count.
    #[inline]
    pub fn with_misses(mut self, n: u32) -> Self {
        self.misses = Some(n);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::now(EventKind::MonitorStarted);
        let b = Event::now(EventKind::MonitorStopped);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_builders_attach_metadata() {
        let ev = Event::now(EventKind::WatchCompleted)
            .with_channel("bus")
            .with_method("send")
            .with_class(ChannelClass::Long)
            .with_timeout(Duration::from_millis(1500))
            .with_misses(4);

        assert_eq!(ev.channel.as_deref(), Some("bus"));
        assert_eq!(ev.method.as_deref(), Some("send"));
        assert_eq!(ev.class, Some(ChannelClass::Long));
        assert_eq!(ev.timeout_ms, Some(1500));
        assert_eq!(ev.misses, Some(4));
    }
}
