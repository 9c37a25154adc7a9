//! # Watchdog runtime configuration.
//!
//! [`Config`] defines the watchdog subsystem's behavior: the two timeout
//! classes, whether monitoring is enabled at all, the watcher pool size,
//! and the monitor loop's poll interval.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use stallwatch::{ChannelClass, Config};
//!
//! let mut cfg = Config::default();
//! cfg.use_watchdog = true;
//! cfg.short_event_timeout = Duration::from_secs(2);
//!
//! assert_eq!(cfg.timeout_for(ChannelClass::Short), Duration::from_secs(2));
//! assert_eq!(cfg.timeout_for(ChannelClass::Long), Duration::from_secs(10));
//! ```

use std::time::Duration;

/// Selects one of the manager's two timeout channels.
///
/// Operations have heterogeneous acceptable latency (a network round trip vs.
/// a same-process handoff); one timeout for both would force false positives
/// on the slower class or missed detection on the faster one. Each class is
/// bound 1:1 to its own queue and monitor loop for the manager's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelClass {
    /// Slow operations (e.g. a network round trip).
    Long,
    /// Fast operations (e.g. a same-process handoff).
    Short,
}

impl ChannelClass {
    /// Returns a short stable label (snake_case) for use in logs/events.
    pub fn as_label(&self) -> &'static str {
        match self {
            ChannelClass::Long => "long",
            ChannelClass::Short => "short",
        }
    }
}

/// Global configuration for the watchdog subsystem.
///
/// Controls the per-class timeouts, whether monitoring is active, watcher
/// concurrency, and monitor loop responsiveness.
#[derive(Clone, Debug)]
pub struct Config {
    /// Timeout for the long channel (slow operations).
    pub long_event_timeout: Duration,
    /// Timeout for the short channel (fast operations).
    pub short_event_timeout: Duration,
    /// Whether the builder produces an active manager (`false` = noop manager).
    pub use_watchdog: bool,
    /// Maximum number of watcher tasks running concurrently per monitor loop.
    pub pool_size: usize,
    /// How long a monitor loop waits on its queue before re-checking.
    ///
    /// Bounds how stale a loop can be with respect to its shutdown sentinel.
    pub poll_interval: Duration,
}

impl Default for Config {
    /// Provides a default configuration:
    /// - `long_event_timeout = 10s`
    /// - `short_event_timeout = 5s`
    /// - `use_watchdog = false`
    /// - `pool_size = 5`
    /// - `poll_interval = 1s`
    fn default() -> Self {
        Self {
            long_event_timeout: Duration::from_secs(10),
            short_event_timeout: Duration::from_secs(5),
            use_watchdog: false,
            pool_size: 5,
            poll_interval: Duration::from_secs(1),
        }
    }
}

impl Config {
    /// Returns the timeout configured for the given channel class.
    pub fn timeout_for(&self, class: ChannelClass) -> Duration {
        match class {
            ChannelClass::Long => self.long_event_timeout,
            ChannelClass::Short => self.short_event_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let cfg = Config::default();
        assert_eq!(cfg.long_event_timeout, Duration::from_secs(10));
        assert_eq!(cfg.short_event_timeout, Duration::from_secs(5));
        assert!(!cfg.use_watchdog);
        assert_eq!(cfg.pool_size, 5);
        assert_eq!(cfg.poll_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_timeout_for_selects_class() {
        let cfg = Config {
            long_event_timeout: Duration::from_millis(700),
            short_event_timeout: Duration::from_millis(300),
            ..Config::default()
        };
        assert_eq!(cfg.timeout_for(ChannelClass::Long), Duration::from_millis(700));
        assert_eq!(cfg.timeout_for(ChannelClass::Short), Duration::from_millis(300));
    }

    #[test]
    fn test_channel_class_labels() {
        assert_eq!(ChannelClass::Long.as_label(), "long");
        assert_eq!(ChannelClass::Short.as_label(), "short");
    }
}
