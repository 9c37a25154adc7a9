use std::sync::Arc;
use std::time::Duration;

use stallwatch::{ChannelClass, Config, LogWriter, WatchManager, WatchdogManagerBuilder};

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let mut cfg = Config::default();
    cfg.use_watchdog = true;
    cfg.long_event_timeout = Duration::from_secs(2);
    cfg.short_event_timeout = Duration::from_millis(500);

    let manager = WatchdogManagerBuilder::new(cfg)
        .subscriber(Arc::new(LogWriter))
        .build();
    manager.start().await.expect("fresh manager starts");

    // Fast handoff: finishes inside the short budget, no diagnostics.
    let handoff = manager.create_watchdog(ChannelClass::Short, "spike-bus", "send");
    handoff
        .observe(tokio::time::sleep(Duration::from_millis(200)))
        .await;

    // Slow consumer: overruns the short budget, prints one line per 500ms.
    let stuck = manager.create_watchdog(ChannelClass::Short, "spike-bus", "recv");
    stuck
        .observe(tokio::time::sleep(Duration::from_millis(1800)))
        .await;

    // Network round trip judged against the long budget instead.
    let rpc = manager.create_watchdog(ChannelClass::Long, "weight-sync", "round_trip");
    rpc.observe(tokio::time::sleep(Duration::from_secs(3))).await;

    manager.stop().await;
    println!("manager stopped");
}
