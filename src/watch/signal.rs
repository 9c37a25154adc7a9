//! # Completion signal: the binary flag a guard and its watcher share.
//!
//! [`CompletionSignal`] is the setter half, owned by the guard side:
//! `clear()` re-arms the flag before a critical section and `complete()`
//! raises it when the section exits. [`CompletionWaiter`] is the waiter half,
//! carried inside a registration to the watcher task: `wait(timeout)` returns
//! `true` iff the flag was raised before the timeout elapsed.
//!
//! Exactly two parties touch one signal: the guard that clears/completes it
//! and the watcher task that waits on it. No third-party access.
//!
//! Built on [`tokio::sync::watch`], which gives the condition-variable-backed
//! flag semantics without any extra locking.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

/// Setter half of a completion flag.
///
/// Cloneable only via the token that owns it; a fresh signal starts raised
/// (nothing in flight) and is cleared by the guard right before it registers.
#[derive(Clone, Debug)]
pub struct CompletionSignal {
    tx: watch::Sender<bool>,
}

impl CompletionSignal {
    /// Creates a new signal in the raised (completed) state.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(true);
        Self { tx }
    }

    /// Re-arms the flag: subsequent waits block until [`complete`](Self::complete).
    ///
    /// Uses `send_replace` so the value is stored even while no waiter is
    /// subscribed yet; a guard clears before its registration (and therefore
    /// before any waiter) exists.
    pub fn clear(&self) {
        self.tx.send_replace(false);
    }

    /// Raises the flag, waking any watcher currently waiting on it.
    ///
    /// Idempotent: raising an already-raised flag has no further effect.
    /// Stored unconditionally, whether or not a waiter is subscribed.
    pub fn complete(&self) {
        self.tx.send_replace(true);
    }

    /// Creates the waiter half observing this signal's current state.
    pub fn waiter(&self) -> CompletionWaiter {
        CompletionWaiter {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for CompletionSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Waiter half of a completion flag.
#[derive(Debug)]
pub struct CompletionWaiter {
    rx: watch::Receiver<bool>,
}

impl CompletionWaiter {
    /// Waits until the flag is raised or `timeout` elapses.
    ///
    /// Returns `true` iff the flag was raised in time. A dropped setter is
    /// treated as raised: the guard side is gone, so there is nothing left
    /// to watch.
    pub async fn wait(&mut self, timeout: Duration) -> bool {
        match time::timeout(timeout, self.rx.wait_for(|done| *done)).await {
            Ok(Ok(_)) => true,
            Ok(Err(_closed)) => true,
            Err(_elapsed) => false,
        }
    }
}
