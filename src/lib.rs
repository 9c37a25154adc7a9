//! # stallwatch
//!
//! **Stallwatch** is a lightweight blocked-operation watchdog for async Rust.
//!
//! Callers wrap a critical section with a scoped guard; if the section does
//! not complete within its channel's time budget, a background watcher starts
//! printing timestamped diagnostics at fixed intervals until it does. The
//! guard is purely observational: it never cancels, interrupts, or alters the
//! guarded operation.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//!  │   Watchdog   │    │   Watchdog   │    │   Watchdog   │
//!  │ (section #1) │    │ (section #2) │    │ (section #3) │
//!  └──────┬───────┘    └──────┬───────┘    └──────┬───────┘
//!         │ enter(): clear signal + enqueue Registration
//!         ▼                   ▼                   ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  WatchdogManager                                              │
//! │  - long queue  ──► long monitor loop  (timeout: 10s default)  │
//! │  - short queue ──► short monitor loop (timeout: 5s default)   │
//! │  - Bus (broadcast events) ──► listener ──► SubscriberSet      │
//! └──────────────────┬────────────────────────┬───────────────────┘
//!                    ▼                        ▼
//!            ┌──────────────┐         ┌──────────────┐
//!            │ watcher task │   ...   │ watcher task │   (bounded pool,
//!            │ (re-waits T) │         │ (re-waits T) │    5 per loop)
//!            └──────┬───────┘         └──────┬───────┘
//!                   │ each missed wait:      │
//!                   ▼                        ▼
//!        HH:MM:SS : Blocked on <channel> :: <method>      (stdout)
//!        Event::BlockDetected                             (bus)
//! ```
//!
//! ### Lifecycle
//! ```text
//! Watchdog::enter()
//!   ├─► signal.clear()
//!   └─► queue.send(Registration { waiter, channel, method })
//!
//! monitor loop (per channel):
//!   poll queue (bounded ~1s)
//!     ├─ Registration ──► spawn watcher (semaphore-gated)
//!     └─ Shutdown sentinel ──► drain pending watchers, exit
//!
//! watcher:
//!   while !waiter.wait(T):
//!     print diagnostic, publish BlockDetected
//!   publish WatchCompleted
//!
//! WatchGuard::drop()            ← every exit path, incl. panic unwind
//!   └─► signal.complete() ──► watcher exits on next wakeup
//! ```
//!
//! ## Choosing a channel
//! Two timeout classes exist because operations have heterogeneous acceptable
//! latency: [`ChannelClass::Long`] for slow operations (network round trips),
//! [`ChannelClass::Short`] for fast handoffs. One shared timeout would force
//! false positives on the slow class or missed detection on the fast one.
//!
//! ## Disabling monitoring
//! [`WatchdogManagerBuilder`] returns the [`NoopWatchdogManager`] unless
//! `use_watchdog` is set. Noop guards carry no token, perform no I/O, and
//! spawn nothing — call sites stay identical either way.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use stallwatch::{ChannelClass, Config, LogWriter, WatchManager, WatchdogManagerBuilder};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mut cfg = Config::default();
//!     cfg.use_watchdog = true;
//!     cfg.short_event_timeout = Duration::from_millis(100);
//!
//!     let manager = WatchdogManagerBuilder::new(cfg)
//!         .subscriber(Arc::new(LogWriter))
//!         .build();
//!     manager.start().await.expect("fresh manager starts");
//!
//!     let wd = manager.create_watchdog(ChannelClass::Short, "spike-bus", "recv");
//!     {
//!         let _watch = wd.enter();
//!         // a section slower than 100ms would start producing diagnostics here
//!     }
//!
//!     manager.stop().await;
//! }
//! ```
//!
//! ## Known limitation
//! `stop()` joins both monitor loops, and a loop only finishes after its
//! pending watchers do. A completion signal that is never raised therefore
//! keeps `stop()` blocked indefinitely. This favors completeness of
//! observation over bounded shutdown and is intentional.

mod config;
mod error;
mod events;
mod manager;
mod monitor;
mod subscribers;
mod watch;

pub use config::{ChannelClass, Config};
pub use error::RuntimeError;
pub use events::{Bus, Event, EventKind};
pub use manager::{
    wait_for_shutdown_signal, NoopWatchdogManager, WatchManager, WatchdogManager,
    WatchdogManagerBuilder,
};
pub use subscribers::{LogWriter, Subscribe, SubscriberSet};
pub use watch::{WatchGuard, Watchdog};
