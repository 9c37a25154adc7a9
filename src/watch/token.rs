//! # Watch token: the closure a guard needs to register and release.
//!
//! A [`WatchToken`] bundles the completion signal, the queue sender for the
//! selected timeout channel, and the channel/method identifiers. The manager
//! creates one per `create_watchdog` call; exactly one [`Watchdog`] holds it.
//!
//! [`Watchdog`]: crate::watch::Watchdog

use std::sync::Arc;

use tokio::sync::mpsc;

use super::registration::MonitorMessage;
use super::signal::CompletionSignal;

/// Immutable bundle binding one watchdog to one monitor queue.
#[derive(Clone, Debug)]
pub struct WatchToken {
    /// Setter half of the completion signal.
    pub(crate) signal: CompletionSignal,
    /// Producer side of the selected channel's registration queue.
    pub(crate) queue: mpsc::UnboundedSender<MonitorMessage>,
    /// Name of the channel the guarded operation runs on.
    pub(crate) channel_name: Arc<str>,
    /// Kind of method being guarded.
    pub(crate) method_type: Arc<str>,
}

impl WatchToken {
    /// Creates a token with a fresh completion signal.
    pub(crate) fn new(
        queue: mpsc::UnboundedSender<MonitorMessage>,
        channel_name: impl Into<Arc<str>>,
        method_type: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            signal: CompletionSignal::new(),
            queue,
            channel_name: channel_name.into(),
            method_type: method_type.into(),
        }
    }
}
