//! Subscriber plumbing: the [`Subscribe`] contract, the fan-out
//! [`SubscriberSet`], and the stdout [`LogWriter`].
//!
//! The manager's bus listener forwards every [`Event`](crate::events::Event)
//! to the set; each subscriber consumes from its own bounded queue so a slow
//! subscriber never blocks the monitor loops or other subscribers.

mod log;
mod set;
mod subscribe;

pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
