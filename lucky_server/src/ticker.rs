use std::sync::Arc;
use std::time::Duration;

use lucky_core::TickEngine;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::info;

fn until_next_second() -> Duration {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    Duration::from_millis(1000 - u64::from(now.subsec_millis()))
}

/// Drives `engine` until `shutdown` flips to true or its sender is dropped.
/// The first frame is produced on the next whole second, then one per period.
pub async fn run_ticker(engine: Arc<TickEngine>, mut shutdown: watch::Receiver<bool>) {
    let period = engine.options().period();
    tokio::select! {
        _ = time::sleep(until_next_second()) => {}
        _ = shutdown.changed() => return,
    }

    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(period_secs = period.as_secs(), "ticker started");
    loop {
        tokio::select! {
            _ = interval.tick() => {
                engine.tick();
            }
            res = shutdown.changed() => {
                if res.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
    info!(last_tick = engine.current_tick_id(), "ticker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use lucky_core::{GameOptions, RandomSource, TickOptions};

    #[tokio::test(start_paused = true)]
    async fn produces_frames_until_shutdown() {
        let engine = Arc::new(TickEngine::new(
            Arc::new(RandomSource::new(1)),
            TickOptions {
                period_seconds: 2,
                ..TickOptions::default()
            },
            GameOptions::default(),
        ));
        let (tx, rx) = watch::channel(false);
        let task = tokio::spawn(run_ticker(engine.clone(), rx));

        // alignment is at most one second, then ticks at +0, +2, +4
        time::sleep(Duration::from_millis(5_500)).await;
        assert_eq!(engine.current_tick_id(), 3);

        tx.send(true).unwrap();
        task.await.unwrap();
        let stopped_at = engine.current_tick_id();
        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(engine.current_tick_id(), stopped_at);
    }

    #[test]
    fn alignment_is_within_a_second() {
        let d = until_next_second();
        assert!(d > Duration::ZERO && d <= Duration::from_secs(1));
    }
}
