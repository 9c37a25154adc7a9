//! # Builder: selects the active or noop manager from configuration.
//!
//! Reads [`Config`] and returns an active [`WatchdogManager`] iff
//! `use_watchdog` is set, otherwise the [`NoopWatchdogManager`]. The choice
//! is made once, here; everything downstream holds a `dyn WatchManager`.
//!
//! ## Example
//! ```
//! use stallwatch::{ChannelClass, Config, WatchManager, WatchdogManagerBuilder};
//!
//! let manager = WatchdogManagerBuilder::new(Config::default()).build();
//!
//! // Default config disables monitoring: the noop manager reports no timeouts.
//! assert!(manager.channel_timeout(ChannelClass::Long).is_none());
//! ```

use std::sync::Arc;

use crate::config::Config;
use crate::subscribers::Subscribe;

use super::active::WatchdogManager;
use super::manage::WatchManager;
use super::noop::NoopWatchdogManager;

/// Builds a watchdog manager from configuration.
pub struct WatchdogManagerBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl WatchdogManagerBuilder {
    /// Starts a builder from the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
        }
    }

    /// Attaches a subscriber to the manager's event bus.
    ///
    /// Ignored when the noop manager is selected (there is no bus to attach
    /// to and no events to deliver).
    pub fn subscriber(mut self, sub: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(sub);
        self
    }

    /// Builds the manager selected by `use_watchdog`.
    ///
    /// Configured timeouts pass through to the active manager unchanged.
    pub fn build(self) -> Arc<dyn WatchManager> {
        if self.cfg.use_watchdog {
            Arc::new(WatchdogManager::with_subscribers(self.cfg, self.subscribers))
        } else {
            Arc::new(NoopWatchdogManager)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::ChannelClass;

    use super::*;

    #[test]
    fn test_disabled_config_selects_noop_manager() {
        let manager = WatchdogManagerBuilder::new(Config::default()).build();
        assert!(manager.channel_timeout(ChannelClass::Long).is_none());
        assert!(!manager
            .create_watchdog(ChannelClass::Short, "bus", "recv")
            .is_armed());
    }

    #[test]
    fn test_enabled_config_passes_timeouts_through() {
        let cfg = Config {
            use_watchdog: true,
            long_event_timeout: Duration::from_secs(7),
            short_event_timeout: Duration::from_millis(250),
            ..Config::default()
        };
        let manager = WatchdogManagerBuilder::new(cfg).build();

        assert_eq!(
            manager.channel_timeout(ChannelClass::Long),
            Some(Duration::from_secs(7))
        );
        assert_eq!(
            manager.channel_timeout(ChannelClass::Short),
            Some(Duration::from_millis(250))
        );
        assert!(manager
            .create_watchdog(ChannelClass::Short, "bus", "recv")
            .is_armed());
    }
}
