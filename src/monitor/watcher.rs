//! # Watcher task: re-wait on one completion signal until it is raised.
//!
//! One watcher per registration. Each wait that elapses without the guarded
//! section finishing produces one timestamped diagnostic line on stdout plus
//! a [`BlockDetected`](crate::events::EventKind::BlockDetected) event; the
//! task exits permanently once the signal is observed.
//!
//! ## Rules
//! - No upper bound on retries: a watcher observes until completion, however
//!   long that takes. It never ages out or force-releases the signal.
//! - Diagnostics for one registration are strictly ordered and monotonically
//!   timestamped; diagnostics across registrations interleave freely.

use std::fmt::Display;
use std::time::Duration;

use chrono::Local;

use crate::events::{Bus, Event, EventKind};
use crate::watch::Registration;

/// Renders one stdout diagnostic: `HH:MM:SS : Blocked on <channel> :: <method>`.
fn diagnostic_line(now: impl Display, reg: &Registration) -> String {
    format!(
        "{now} : Blocked on {} :: {}",
        reg.channel_name, reg.method_type
    )
}

/// Waits on the registration's signal with `timeout`, printing one diagnostic
/// per elapsed interval, until the guarded section completes.
pub(crate) async fn watch_until_complete(mut reg: Registration, timeout: Duration, bus: Bus) {
    let mut misses: u32 = 0;

    while !reg.waiter.wait(timeout).await {
        misses = misses.saturating_add(1);
        println!("{}", diagnostic_line(Local::now().format("%H:%M:%S"), &reg));
        bus.publish(
            Event::now(EventKind::BlockDetected)
                .with_channel(reg.channel_name.clone())
                .with_method(reg.method_type.clone())
                .with_misses(misses),
        );
    }

    bus.publish(
        Event::now(EventKind::WatchCompleted)
            .with_channel(reg.channel_name.clone())
            .with_method(reg.method_type.clone())
            .with_misses(misses),
    );
}

#[cfg(test)]
mod tests {
    use crate::watch::CompletionSignal;

    use super::*;

    fn registration(channel: &str, method: &str) -> Registration {
        Registration {
            waiter: CompletionSignal::new().waiter(),
            channel_name: channel.into(),
            method_type: method.into(),
        }
    }

    #[test]
    fn test_diagnostic_line_matches_mandated_format() {
        let reg = registration("spike-bus", "recv");
        assert_eq!(
            diagnostic_line("12:34:56", &reg),
            "12:34:56 : Blocked on spike-bus :: recv"
        );
    }

    #[test]
    fn test_diagnostic_timestamp_is_hh_mm_ss() {
        let now = Local::now().format("%H:%M:%S").to_string();
        let bytes = now.as_bytes();

        assert_eq!(now.len(), 8, "timestamp {now:?} is not HH:MM:SS");
        for (i, b) in bytes.iter().enumerate() {
            match i {
                2 | 5 => assert_eq!(*b, b':', "timestamp {now:?} is not HH:MM:SS"),
                _ => assert!(b.is_ascii_digit(), "timestamp {now:?} is not HH:MM:SS"),
            }
        }
    }
}
