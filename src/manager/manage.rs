//! # Manager contract shared by the active and noop implementations.
//!
//! [`WatchManager`] is the seam the rest of an application codes against.
//! Which implementation sits behind it is decided **once**, at build time, by
//! the [`WatchdogManagerBuilder`](crate::WatchdogManagerBuilder) — call sites
//! are identical whether or not monitoring is active, and no runtime type
//! inspection is ever needed.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::ChannelClass;
use crate::error::RuntimeError;
use crate::watch::Watchdog;

/// Contract for watchdog managers.
#[async_trait]
pub trait WatchManager: Send + Sync + 'static {
    /// Returns the timeout configured for a channel class.
    ///
    /// `None` means monitoring is disabled (the noop manager).
    fn channel_timeout(&self, class: ChannelClass) -> Option<Duration>;

    /// Creates a watchdog bound to the selected timeout channel.
    ///
    /// Callable in any manager state, but registrations are only consumed
    /// once [`start`](Self::start) has run. The noop manager returns a
    /// disarmed watchdog whose guard performs no I/O at all.
    fn create_watchdog(&self, class: ChannelClass, channel_name: &str, method_type: &str)
        -> Watchdog;

    /// Starts background monitoring (`unstarted → running`).
    ///
    /// Fails with [`RuntimeError::AlreadyStarted`] on a running manager and
    /// [`RuntimeError::AlreadyStopped`] after `stop()`. The noop manager
    /// always succeeds without spawning anything.
    async fn start(&self) -> Result<(), RuntimeError>;

    /// Stops background monitoring (`running → stopped`, terminal).
    ///
    /// Idempotent: calling it again (or on a never-started manager) is a
    /// no-op. Blocks until both monitor loops have exited — which includes
    /// draining their pending watcher tasks, so a never-signaled event keeps
    /// this call blocked indefinitely (documented liveness risk).
    async fn stop(&self);
}
