//! Explicit tick scheduler driving the refresh loop.
//!
//! [`Scheduler`] owns no global state: the application creates one, starts
//! it with a tick callback and stops it from inside the callback (or from
//! any clone of the scheduler). Everything runs on the calling task.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Shortest interval the scheduler accepts.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Fixed-interval tick loop.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    running: Rc<Cell<bool>>,
}

impl Scheduler {
    /// A stopped scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `on_tick` every `interval` until [`stop`](Scheduler::stop) is
    /// called. The first tick fires immediately. Returns the number of
    /// ticks run.
    ///
    /// Ticks that fall behind are skipped rather than bunched up.
    pub async fn start(&self, interval: Duration, mut on_tick: impl FnMut(&Scheduler)) -> u64 {
        let interval = interval.max(MIN_INTERVAL);
        let mut timer = tokio::time::interval(interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.running.set(true);
        debug!(?interval, "scheduler started");

        let mut ticks = 0;
        while self.running.get() {
            timer.tick().await;
            if !self.running.get() {
                break;
            }
            on_tick(self);
            ticks += 1;
        }
        debug!(ticks, "scheduler stopped");
        ticks
    }

    /// Stop the loop after the current tick.
    pub fn stop(&self) {
        self.running.set(false);
    }

    /// Whether the loop is running.
    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stops_from_inside_a_tick() {
        let scheduler = Scheduler::new();
        let mut seen = 0;
        let ticks = scheduler
            .start(Duration::from_millis(1), |s| {
                seen += 1;
                if seen == 3 {
                    s.stop();
                }
            })
            .await;
        assert_eq!(ticks, 3);
        assert_eq!(seen, 3);
        assert!(!scheduler.is_running());
    }

    #[tokio::test]
    async fn zero_interval_is_clamped() {
        let scheduler = Scheduler::new();
        let ticks = scheduler.start(Duration::ZERO, |s| s.stop()).await;
        assert_eq!(ticks, 1);
    }

    #[test]
    fn clones_share_running_flag() {
        let scheduler = Scheduler::new();
        let other = scheduler.clone();
        let ticks = tokio_test::block_on(scheduler.start(Duration::from_millis(1), |_| other.stop()));
        assert_eq!(ticks, 1);
        assert!(!scheduler.is_running());
    }
}
