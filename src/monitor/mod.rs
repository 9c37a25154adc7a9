//! Background monitoring: the per-channel monitor loop and the watcher tasks
//! it dispatches.
//!
//! Internal modules:
//! - [`run`]: the monitor loop (bounded queue poll, sentinel handling, drain);
//! - [`watcher`]: one re-waiting watcher per registration.

mod run;
mod watcher;

pub(crate) use run::{run_monitor, MonitorParams};
