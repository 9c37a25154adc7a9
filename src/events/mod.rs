//! Runtime events and the broadcast bus that carries them.
//!
//! - [`Event`] / [`EventKind`]: what happened, with metadata and a monotonic
//!   sequence number;
//! - [`Bus`]: non-blocking broadcast channel shared by the monitor loops,
//!   watcher tasks, and the manager.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
