//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//! This is primarily useful for development, debugging, and examples.
//!
//! Note that the watchdog's mandated diagnostic line
//! (`HH:MM:SS : Blocked on <channel> :: <method>`) is printed by the watcher
//! task itself, with or without subscribers attached; [`LogWriter`] adds the
//! surrounding lifecycle context.
//!
//! ## Output format
//! ```text
//! [monitor-started] class=short timeout_ms=5000
//! [registered] channel=spike-bus method=recv class=short
//! [blocked] channel=spike-bus method=recv misses=1
//! [completed] channel=spike-bus method=recv misses=3
//! [monitor-draining] class=short
//! [monitor-stopped] class=short
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};

use super::Subscribe;

/// Simple stdout logging subscriber.
///
/// Prints human-readable event descriptions to stdout for debugging and
/// demonstration purposes. Not intended for production use - implement a
/// custom [`Subscribe`] for structured logging or metrics collection.
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::MonitorStarted => {
                println!(
                    "[monitor-started] class={:?} timeout_ms={:?}",
                    e.class.map(|c| c.as_label()),
                    e.timeout_ms
                );
            }
            EventKind::MonitorDraining => {
                println!("[monitor-draining] class={:?}", e.class.map(|c| c.as_label()));
            }
            EventKind::MonitorStopped => {
                println!("[monitor-stopped] class={:?}", e.class.map(|c| c.as_label()));
            }
            EventKind::WatchRegistered => {
                println!(
                    "[registered] channel={:?} method={:?} class={:?}",
                    e.channel,
                    e.method,
                    e.class.map(|c| c.as_label())
                );
            }
            EventKind::BlockDetected => {
                println!(
                    "[blocked] channel={:?} method={:?} misses={:?}",
                    e.channel, e.method, e.misses
                );
            }
            EventKind::WatchCompleted => {
                println!(
                    "[completed] channel={:?} method={:?} misses={:?}",
                    e.channel, e.method, e.misses
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "log_writer"
    }
}
