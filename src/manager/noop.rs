//! # Noop manager: monitoring disabled, identical contract.
//!
//! Selected by the builder when `use_watchdog` is false. Every operation is a
//! no-op: guards are disarmed (acquire/release do nothing), `start`/`stop`
//! spawn and tear down nothing, and no output is ever produced. Call sites
//! stay identical whether or not monitoring is active.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::ChannelClass;
use crate::error::RuntimeError;
use crate::watch::Watchdog;

use super::manage::WatchManager;

/// Inert watchdog manager.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopWatchdogManager;

#[async_trait]
impl WatchManager for NoopWatchdogManager {
    fn channel_timeout(&self, _class: ChannelClass) -> Option<Duration> {
        None
    }

    fn create_watchdog(
        &self,
        _class: ChannelClass,
        _channel_name: &str,
        _method_type: &str,
    ) -> Watchdog {
        Watchdog::disarmed()
    }

    async fn start(&self) -> Result<(), RuntimeError> {
        Ok(())
    }

    async fn stop(&self) {}
}
