//! # WatchdogManager: owns both timeout channels and their monitor loops.
//!
//! The manager holds one queue per timeout class, spawns one monitor loop per
//! queue on `start()`, and hands out [`Watchdog`] guards bound to either
//! class. It also owns the event [`Bus`] and forwards events to subscribers
//! through a listener task.
//!
//! ## High-level architecture
//! ```text
//! create_watchdog(class, channel, method)
//!        │  fresh CompletionSignal + WatchToken(queue=class)
//!        ▼
//!    Watchdog ── enter() ── MonitorMessage::Watch ──► [long queue]  ──► long monitor loop
//!                                                     [short queue] ──► short monitor loop
//!                                                                            │
//!                                                   watcher tasks ◄──────────┘
//!                                                   (bounded pool, one per registration)
//!
//! Event flow:
//!   monitors + watchers ── publish(Event) ──► Bus ──► listener ──► SubscriberSet::emit
//!
//! Shutdown path (stop()):
//!   send Shutdown sentinel on both queues
//!     └─► join long monitor   (blocks through its watcher drain)
//!     └─► join short monitor  (blocks through its watcher drain)
//!     └─► stop listener, flush buffered events, shut the subscriber set down
//! ```
//!
//! ## State machine
//! `unstarted → running → stopped`, with `stopped` terminal. `stop()` is
//! idempotent and safe from any state; `start()` errors outside `unstarted`.
//!
//! The known liveness risk is deliberate: a guard that never drops keeps its
//! watcher alive, the watcher keeps its monitor's drain open, and the drain
//! keeps `stop()` blocked.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;

use crate::config::{ChannelClass, Config};
use crate::error::RuntimeError;
use crate::events::{Bus, Event};
use crate::monitor::{run_monitor, MonitorParams};
use crate::subscribers::{Subscribe, SubscriberSet};
use crate::watch::{MonitorMessage, WatchToken, Watchdog};

/// Lifecycle state guarded by the manager's mutex.
enum State {
    /// Constructed, monitors not yet spawned. Holds the consumer halves of
    /// both queues and the subscribers to attach on start.
    Idle {
        long_rx: mpsc::UnboundedReceiver<MonitorMessage>,
        short_rx: mpsc::UnboundedReceiver<MonitorMessage>,
        subscribers: Vec<Arc<dyn Subscribe>>,
    },
    /// Monitors and the bus listener are running.
    Running {
        long: JoinHandle<()>,
        short: JoinHandle<()>,
        listener: JoinHandle<()>,
        stop_listener: oneshot::Sender<()>,
    },
    /// Terminal. Queues stay open for straggler guards, but nothing consumes
    /// them anymore.
    Stopped,
}

/// Active watchdog manager: two timeout channels, each with its own queue,
/// monitor loop, and timeout value.
pub struct WatchdogManager {
    cfg: Config,
    bus: Bus,
    long_tx: mpsc::UnboundedSender<MonitorMessage>,
    short_tx: mpsc::UnboundedSender<MonitorMessage>,
    state: Mutex<State>,
}

impl WatchdogManager {
    /// Creates an unstarted manager with no subscribers.
    pub fn new(cfg: Config) -> Self {
        Self::with_subscribers(cfg, Vec::new())
    }

    /// Creates an unstarted manager; `subscribers` are attached to the bus
    /// listener when `start()` runs.
    pub fn with_subscribers(cfg: Config, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        let (long_tx, long_rx) = mpsc::unbounded_channel();
        let (short_tx, short_rx) = mpsc::unbounded_channel();
        Self {
            cfg,
            bus: Bus::default(),
            long_tx,
            short_tx,
            state: Mutex::new(State::Idle {
                long_rx,
                short_rx,
                subscribers,
            }),
        }
    }

    /// Creates a new receiver observing this manager's runtime events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    fn queue_for(&self, class: ChannelClass) -> &mpsc::UnboundedSender<MonitorMessage> {
        match class {
            ChannelClass::Long => &self.long_tx,
            ChannelClass::Short => &self.short_tx,
        }
    }

    fn monitor_params(&self, class: ChannelClass) -> MonitorParams {
        MonitorParams {
            class,
            timeout: self.cfg.timeout_for(class),
            pool_size: self.cfg.pool_size,
            poll_interval: self.cfg.poll_interval,
        }
    }

    /// Forwards bus events to the subscriber set until stopped, then flushes
    /// whatever the bus still buffers and shuts the set down.
    async fn listen(
        mut rx: tokio::sync::broadcast::Receiver<Event>,
        set: SubscriberSet,
        mut stop: oneshot::Receiver<()>,
    ) {
        use tokio::sync::broadcast::error::{RecvError, TryRecvError};

        loop {
            tokio::select! {
                ev = rx.recv() => match ev {
                    Ok(ev) => set.emit(&ev),
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                },
                _ = &mut stop => break,
            }
        }

        loop {
            match rx.try_recv() {
                Ok(ev) => set.emit(&ev),
                Err(TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
        set.shutdown().await;
    }
}

#[async_trait::async_trait]
impl super::manage::WatchManager for WatchdogManager {
    fn channel_timeout(&self, class: ChannelClass) -> Option<std::time::Duration> {
        Some(self.cfg.timeout_for(class))
    }

    fn create_watchdog(
        &self,
        class: ChannelClass,
        channel_name: &str,
        method_type: &str,
    ) -> Watchdog {
        Watchdog::armed(WatchToken::new(
            self.queue_for(class).clone(),
            channel_name,
            method_type,
        ))
    }

    async fn start(&self) -> Result<(), RuntimeError> {
        let mut state = self.state.lock().await;
        match std::mem::replace(&mut *state, State::Stopped) {
            State::Idle {
                long_rx,
                short_rx,
                subscribers,
            } => {
                let (stop_tx, stop_rx) = oneshot::channel();
                let listener = tokio::spawn(Self::listen(
                    self.bus.subscribe(),
                    SubscriberSet::new(subscribers),
                    stop_rx,
                ));
                let long = tokio::spawn(run_monitor(
                    long_rx,
                    self.monitor_params(ChannelClass::Long),
                    self.bus.clone(),
                ));
                let short = tokio::spawn(run_monitor(
                    short_rx,
                    self.monitor_params(ChannelClass::Short),
                    self.bus.clone(),
                ));

                *state = State::Running {
                    long,
                    short,
                    listener,
                    stop_listener: stop_tx,
                };
                Ok(())
            }
            running @ State::Running { .. } => {
                *state = running;
                Err(RuntimeError::AlreadyStarted)
            }
            State::Stopped => Err(RuntimeError::AlreadyStopped),
        }
    }

    async fn stop(&self) {
        // Transition first so a second stop() observes `Stopped` immediately,
        // even while this call is still blocked on the joins below.
        let taken = {
            let mut state = self.state.lock().await;
            std::mem::replace(&mut *state, State::Stopped)
        };

        let State::Running {
            long,
            short,
            listener,
            stop_listener,
        } = taken
        else {
            return;
        };

        let _ = self.long_tx.send(MonitorMessage::Shutdown);
        let _ = self.short_tx.send(MonitorMessage::Shutdown);

        // Joins block through each monitor's watcher drain.
        let _ = long.await;
        let _ = short.await;

        let _ = stop_listener.send(());
        let _ = listener.await;
    }
}
