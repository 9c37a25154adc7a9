//! # Watchdog: scoped instrumentation of a critical section.
//!
//! A [`Watchdog`] wraps one operation the caller wants watched. Entering it
//! re-arms the completion signal and enqueues a registration on the bound
//! monitor queue; the returned [`WatchGuard`] raises the signal when dropped,
//! on **every** exit path — normal return, early `?` return, or panic unwind.
//!
//! ```text
//! let wd = manager.create_watchdog(ChannelClass::Short, "spike-bus", "recv");
//!
//! {
//!     let _watch = wd.enter();     // clear signal + enqueue registration
//!     do_blocking_work()?;         // diagnostics start if this overruns
//! }                                // guard drops → signal completes
//! ```
//!
//! A disarmed watchdog (no token) performs no I/O and has zero overhead; this
//! is how the noop manager disables monitoring without changing call sites.
//! The guard is purely observational: it never alters the guarded section's
//! result, and failures inside the section propagate to the caller unmodified.

use std::future::Future;

use super::registration::{MonitorMessage, Registration};
use super::signal::CompletionSignal;
use super::token::WatchToken;

/// Scoped watchdog for one critical section.
///
/// Created by a manager's `create_watchdog`; reusable across successive
/// critical sections (one [`WatchGuard`] at a time).
#[derive(Clone, Debug)]
pub struct Watchdog {
    token: Option<WatchToken>,
}

impl Watchdog {
    /// Creates a watchdog bound to a token (active monitoring).
    pub(crate) fn armed(token: WatchToken) -> Self {
        Self { token: Some(token) }
    }

    /// Creates a watchdog with no token (monitoring disabled).
    pub(crate) fn disarmed() -> Self {
        Self { token: None }
    }

    /// True if this watchdog registers with a monitor loop on entry.
    pub fn is_armed(&self) -> bool {
        self.token.is_some()
    }

    /// Enters the critical section: clears the signal, enqueues a
    /// registration, and returns the guard whose drop marks completion.
    ///
    /// The signal is cleared **before** the registration is enqueued, so a
    /// watcher can never observe a stale raised flag from a previous section.
    /// Disarmed watchdogs return an inert guard without any side effect.
    pub fn enter(&self) -> WatchGuard<'_> {
        if let Some(token) = &self.token {
            token.signal.clear();
            let _ = token.queue.send(MonitorMessage::Watch(Registration {
                waiter: token.signal.waiter(),
                channel_name: token.channel_name.clone(),
                method_type: token.method_type.clone(),
            }));
        }
        WatchGuard {
            signal: self.token.as_ref().map(|t| &t.signal),
        }
    }

    /// Runs `section` under this watchdog.
    ///
    /// Convenience wrapper around [`enter`](Self::enter) for futures; the
    /// guard is held across the await and released whatever the outcome.
    pub async fn observe<F: Future>(&self, section: F) -> F::Output {
        let _watch = self.enter();
        section.await
    }
}

/// RAII release handle for one entered critical section.
///
/// Dropping the guard raises the completion signal unconditionally; the
/// watcher task observing it exits on its next wakeup.
#[must_use = "dropping the guard immediately marks the section complete"]
#[derive(Debug)]
pub struct WatchGuard<'a> {
    signal: Option<&'a CompletionSignal>,
}

impl Drop for WatchGuard<'_> {
    fn drop(&mut self) {
        if let Some(signal) = self.signal {
            signal.complete();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::mpsc;

    use super::*;

    fn armed_watchdog() -> (Watchdog, mpsc::UnboundedReceiver<MonitorMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let wd = Watchdog::armed(WatchToken::new(tx, "bus", "send"));
        (wd, rx)
    }

    #[tokio::test]
    async fn test_enter_enqueues_registration() {
        let (wd, mut rx) = armed_watchdog();
        let _watch = wd.enter();

        match rx.try_recv() {
            Ok(MonitorMessage::Watch(reg)) => {
                assert_eq!(reg.channel_name.as_ref(), "bus");
                assert_eq!(reg.method_type.as_ref(), "send");
            }
            other => panic!("expected a registration, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_signal_cleared_on_enter_and_raised_on_drop() {
        let (wd, mut rx) = armed_watchdog();

        let watch = wd.enter();
        let Some(MonitorMessage::Watch(mut reg)) = rx.recv().await else {
            panic!("expected a registration");
        };
        assert!(!reg.waiter.wait(Duration::from_millis(10)).await);

        drop(watch);
        assert!(reg.waiter.wait(Duration::from_millis(10)).await);
    }

    #[tokio::test]
    async fn test_guard_releases_on_panic_unwind() {
        let (wd, mut rx) = armed_watchdog();

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _watch = wd.enter();
            panic!("guarded section failed");
        }));
        assert!(outcome.is_err());

        let Some(MonitorMessage::Watch(mut reg)) = rx.recv().await else {
            panic!("expected a registration");
        };
        assert!(reg.waiter.wait(Duration::from_millis(10)).await);
    }

    #[tokio::test]
    async fn test_observe_propagates_error_and_completes() {
        let (wd, mut rx) = armed_watchdog();

        let res: Result<(), &str> = wd.observe(async { Err("boom") }).await;
        assert_eq!(res, Err("boom"));

        let Some(MonitorMessage::Watch(mut reg)) = rx.recv().await else {
            panic!("expected a registration");
        };
        assert!(reg.waiter.wait(Duration::from_millis(10)).await);
    }

    #[tokio::test]
    async fn test_disarmed_watchdog_is_inert() {
        let wd = Watchdog::disarmed();
        assert!(!wd.is_armed());

        let watch = wd.enter();
        drop(watch);

        let out = wd.observe(async { 7 }).await;
        assert_eq!(out, 7);
    }
}
