//! Manager layer: lifecycle and guard creation.
//!
//! The only decision point is the builder: it reads configuration once and
//! hands back either the active [`WatchdogManager`] or the inert
//! [`NoopWatchdogManager`] behind the shared [`WatchManager`] contract.
//!
//! Internal modules:
//! - [`manage`]: the `WatchManager` trait;
//! - [`active`]: two-channel manager with monitor loops and bus listener;
//! - [`noop`]: the disabled variant;
//! - [`builder`]: configuration-driven selection;
//! - [`shutdown`]: OS-signal helper for exit-time teardown.

mod active;
mod builder;
mod manage;
mod noop;
mod shutdown;

pub use active::WatchdogManager;
pub use builder::WatchdogManagerBuilder;
pub use manage::WatchManager;
pub use noop::NoopWatchdogManager;
pub use shutdown::wait_for_shutdown_signal;
