//! # Monitor loop: dequeue registrations, dispatch bounded watcher tasks.
//!
//! One loop per timeout channel, bound to one queue and one timeout value for
//! its entire lifetime. The loop polls its queue with a short bounded timeout
//! so it stays responsive to the shutdown sentinel, and hands each
//! registration to a watcher task gated by a semaphore, so one slow
//! registration never starves detection of others.
//!
//! ## Loop body
//! ```text
//! loop {
//!   poll queue (bounded, cfg.poll_interval)
//!     ├─ elapsed            → continue            (poll-miss: routine, not an error)
//!     ├─ Watch(reg)         → spawn watcher       (waits for a pool permit, then watches)
//!     ├─ Shutdown sentinel  → break               (publish MonitorDraining)
//!     └─ queue closed       → break               (all senders gone)
//! }
//! drain: await every pending watcher, then publish MonitorStopped
//! ```
//!
//! ## Rules
//! - The loop itself never blocks on any individual completion signal.
//! - Registrations are dispatched in enqueue order; watcher output across
//!   registrations is unordered because watchers run concurrently.
//! - The drain after the sentinel has no bound: never-signaled registrations
//!   keep the drain (and therefore the manager's `stop()`) blocked.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tokio::time;

use crate::config::ChannelClass;
use crate::events::{Bus, Event, EventKind};
use crate::watch::MonitorMessage;

use super::watcher::watch_until_complete;

/// Parameters binding one monitor loop to its channel.
pub(crate) struct MonitorParams {
    /// Timeout class this loop serves (for events only).
    pub class: ChannelClass,
    /// Timeout each watcher waits with.
    pub timeout: Duration,
    /// Maximum concurrently running watcher tasks.
    pub pool_size: usize,
    /// Bounded queue-poll interval.
    pub poll_interval: Duration,
}

/// Runs one monitor loop to completion.
///
/// Returns once the shutdown sentinel (or queue closure) has been observed
/// **and** every dispatched watcher task has exited.
pub(crate) async fn run_monitor(
    mut queue: mpsc::UnboundedReceiver<MonitorMessage>,
    params: MonitorParams,
    bus: Bus,
) {
    bus.publish(
        Event::now(EventKind::MonitorStarted)
            .with_class(params.class)
            .with_timeout(params.timeout),
    );

    let pool = Arc::new(Semaphore::new(params.pool_size.max(1)));
    let mut watchers: JoinSet<()> = JoinSet::new();

    loop {
        match time::timeout(params.poll_interval, queue.recv()).await {
            Err(_elapsed) => {
                // Poll-miss: reap any finished watchers, keep polling.
                while watchers.try_join_next().is_some() {}
                continue;
            }
            Ok(None) => break,
            Ok(Some(MonitorMessage::Shutdown)) => break,
            Ok(Some(MonitorMessage::Watch(reg))) => {
                bus.publish(
                    Event::now(EventKind::WatchRegistered)
                        .with_channel(reg.channel_name.clone())
                        .with_method(reg.method_type.clone())
                        .with_class(params.class),
                );

                let pool = Arc::clone(&pool);
                let bus = bus.clone();
                let timeout = params.timeout;
                watchers.spawn(async move {
                    // Queues behind the pool cap instead of blocking the loop.
                    let Ok(_permit) = pool.acquire_owned().await else {
                        return;
                    };
                    watch_until_complete(reg, timeout, bus).await;
                });
            }
        }
    }

    bus.publish(Event::now(EventKind::MonitorDraining).with_class(params.class));

    // Unbounded by design: watchers for never-signaled events hold this open.
    while watchers.join_next().await.is_some() {}

    bus.publish(Event::now(EventKind::MonitorStopped).with_class(params.class));
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc::unbounded_channel;

    use crate::events::EventKind;
    use crate::watch::WatchToken;
    use crate::Watchdog;

    use super::*;

    fn params(timeout_ms: u64) -> MonitorParams {
        MonitorParams {
            class: ChannelClass::Short,
            timeout: Duration::from_millis(timeout_ms),
            pool_size: 5,
            poll_interval: Duration::from_millis(100),
        }
    }

    async fn next_of_kind(
        rx: &mut tokio::sync::broadcast::Receiver<Event>,
        kind: EventKind,
    ) -> Event {
        loop {
            let ev = rx.recv().await.expect("bus closed before expected event");
            if ev.kind == kind {
                return ev;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sentinel_stops_loop_with_no_watchers() {
        let bus = Bus::default();
        let mut events = bus.subscribe();
        let (tx, rx) = unbounded_channel();

        let monitor = tokio::spawn(run_monitor(rx, params(100), bus));
        tx.send(MonitorMessage::Shutdown).expect("queue open");

        monitor.await.expect("monitor task panicked");
        next_of_kind(&mut events, EventKind::MonitorDraining).await;
        next_of_kind(&mut events, EventKind::MonitorStopped).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_queue_closure_stops_loop() {
        let bus = Bus::default();
        let (tx, rx) = unbounded_channel();

        let monitor = tokio::spawn(run_monitor(rx, params(100), bus));
        drop(tx);

        monitor.await.expect("monitor task panicked");
    }

    #[tokio::test(start_paused = true)]
    async fn test_registration_dispatches_watcher() {
        let bus = Bus::default();
        let mut events = bus.subscribe();
        let (tx, rx) = unbounded_channel();
        let monitor = tokio::spawn(run_monitor(rx, params(100), bus));

        let wd = Watchdog::armed(WatchToken::new(tx.clone(), "bus", "recv"));
        let watch = wd.enter();
        let registered = next_of_kind(&mut events, EventKind::WatchRegistered).await;
        assert_eq!(registered.channel.as_deref(), Some("bus"));
        assert_eq!(registered.class, Some(ChannelClass::Short));

        drop(watch);
        let completed = next_of_kind(&mut events, EventKind::WatchCompleted).await;
        assert_eq!(completed.misses, Some(0));

        tx.send(MonitorMessage::Shutdown).expect("queue open");
        monitor.await.expect("monitor task panicked");
    }

    #[tokio::test(start_paused = true)]
    async fn test_drain_waits_for_pending_watchers() {
        let bus = Bus::default();
        let mut events = bus.subscribe();
        let (tx, rx) = unbounded_channel();
        let monitor = tokio::spawn(run_monitor(rx, params(100), bus));

        let wd = Watchdog::armed(WatchToken::new(tx.clone(), "bus", "recv"));
        let watch = wd.enter();
        next_of_kind(&mut events, EventKind::WatchRegistered).await;

        // Sentinel exits the loop promptly, but the pending watcher holds the
        // drain open until the guard is released.
        tx.send(MonitorMessage::Shutdown).expect("queue open");
        next_of_kind(&mut events, EventKind::MonitorDraining).await;

        drop(watch);
        monitor.await.expect("monitor task panicked");
        next_of_kind(&mut events, EventKind::MonitorStopped).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_registration_does_not_starve_others() {
        let bus = Bus::default();
        let mut events = bus.subscribe();
        let (tx, rx) = unbounded_channel();
        let monitor = tokio::spawn(run_monitor(rx, params(100), bus));

        let slow = Watchdog::armed(WatchToken::new(tx.clone(), "slow-bus", "recv"));
        let fast = Watchdog::armed(WatchToken::new(tx.clone(), "fast-bus", "send"));

        let slow_watch = slow.enter();
        let fast_watch = fast.enter();
        drop(fast_watch);

        // The fast registration completes while the slow one is still held.
        loop {
            let ev = next_of_kind(&mut events, EventKind::WatchCompleted).await;
            if ev.channel.as_deref() == Some("fast-bus") {
                break;
            }
        }

        drop(slow_watch);
        tx.send(MonitorMessage::Shutdown).expect("queue open");
        monitor.await.expect("monitor task panicked");
    }
}
