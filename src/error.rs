//! Error types used by the stallwatch runtime.
//!
//! The watchdog subsystem raises no user-facing errors in steady state: it
//! only observes and reports. [`RuntimeError`] covers the few lifecycle
//! misuses that are detectable at the manager boundary.

use thiserror::Error;

/// # Errors produced by the watchdog manager lifecycle.
///
/// The manager's state machine is `unstarted → running → stopped` with
/// `stopped` terminal. Only `start()` is fallible; `stop()` is idempotent
/// and never errors.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// `start()` was called while the monitor loops were already running.
    #[error("manager already started")]
    AlreadyStarted,

    /// `start()` was called after the manager had been stopped.
    ///
    /// `stopped` is terminal; a stopped manager's queues are closed to new
    /// monitor loops and cannot be restarted.
    #[error("manager already stopped")]
    AlreadyStopped,
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use stallwatch::RuntimeError;
    ///
    /// assert_eq!(RuntimeError::AlreadyStarted.as_label(), "manager_already_started");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::AlreadyStarted => "manager_already_started",
            RuntimeError::AlreadyStopped => "manager_already_stopped",
        }
    }

    /// Returns a human-readable message with details about the error.
    ///
    /// # Example
    /// ```
    /// use stallwatch::RuntimeError;
    ///
    /// let msg = RuntimeError::AlreadyStopped.as_message();
    /// assert_eq!(msg, "start() called on a stopped manager");
    /// ```
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::AlreadyStarted => "start() called on a running manager".to_string(),
            RuntimeError::AlreadyStopped => "start() called on a stopped manager".to_string(),
        }
    }
}
