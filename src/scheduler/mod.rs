//! Tick scheduler
//!
//! Wraps a single [`tokio::time::Interval`] that can be re-armed at a new
//! period or cancelled outright. Every arm or cancel bumps a generation
//! counter and each [`Tick`] carries the generation it was produced under, so
//! a tick that belongs to a superseded timer can be recognised and dropped.

use std::future;
use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// One firing of the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    generation: u64,
}

impl Tick {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct TickScheduler {
    timer: Option<Interval>,
    period: Option<Duration>,
    generation: u64,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any running timer with one firing every `period`
    ///
    /// The first tick arrives one full period from now. Returns the new
    /// generation.
    pub fn arm(&mut self, period: Duration) -> u64 {
        self.generation += 1;

        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
        self.period = Some(period);

        tracing::debug!(
            generation = self.generation,
            period_ms = period.as_millis() as u64,
            "Tick timer armed"
        );
        self.generation
    }

    /// Stop ticking until the next [`arm`](Self::arm)
    pub fn cancel(&mut self) {
        if self.timer.take().is_some() {
            tracing::debug!(generation = self.generation, "Tick timer cancelled");
        }
        self.generation += 1;
        self.period = None;
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether `tick` came from the timer that is armed right now
    pub fn is_current(&self, tick: Tick) -> bool {
        self.timer.is_some() && tick.generation == self.generation
    }

    /// Wait for the next tick. Never resolves while cancelled.
    ///
    /// Cancel safe, so it can sit in a `tokio::select!` next to other events.
    pub async fn tick(&mut self) -> Tick {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
                Tick {
                    generation: self.generation,
                }
            }
            None => future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};

    #[tokio::test(start_paused = true)]
    async fn test_unarmed_scheduler_never_ticks() {
        let mut scheduler = TickScheduler::new();

        assert!(!scheduler.is_armed());
        let result = timeout(Duration::from_secs(10), scheduler.tick()).await;
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_at_armed_period() {
        let mut scheduler = TickScheduler::new();
        let generation = scheduler.arm(Duration::from_millis(150));
        let started = Instant::now();

        let tick = scheduler.tick().await;
        assert_eq!(tick.generation(), generation);
        assert!(scheduler.is_current(tick));
        assert!(started.elapsed() >= Duration::from_millis(150));
        assert!(started.elapsed() < Duration::from_millis(151));

        scheduler.tick().await;
        assert!(started.elapsed() >= Duration::from_millis(300));
        assert!(started.elapsed() < Duration::from_millis(301));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_replaces_period() {
        let mut scheduler = TickScheduler::new();
        scheduler.arm(Duration::from_millis(150));
        scheduler.tick().await;

        let before = Instant::now();
        scheduler.arm(Duration::from_millis(148));
        assert_eq!(scheduler.period(), Some(Duration::from_millis(148)));

        scheduler.tick().await;
        assert!(before.elapsed() >= Duration::from_millis(148));
        assert!(before.elapsed() < Duration::from_millis(149));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_tick_is_not_current() {
        let mut scheduler = TickScheduler::new();
        scheduler.arm(Duration::from_millis(100));
        let old_tick = scheduler.tick().await;

        scheduler.arm(Duration::from_millis(100));
        assert!(!scheduler.is_current(old_tick));

        scheduler.cancel();
        assert!(!scheduler.is_current(old_tick));
        assert!(!scheduler.is_armed());
        assert_eq!(scheduler.period(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let mut scheduler = TickScheduler::new();
        scheduler.arm(Duration::from_millis(50));
        scheduler.cancel();

        advance(Duration::from_secs(1)).await;
        let result = timeout(Duration::from_secs(1), scheduler.tick()).await;
        assert!(result.is_err());
    }
}
