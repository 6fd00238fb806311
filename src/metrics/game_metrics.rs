use std::time::{Duration, Instant};

/// Per-session statistics shown next to the board
#[derive(Debug, Clone)]
pub struct GameMetrics {
    accumulated: Duration,
    running_since: Option<Instant>,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            accumulated: Duration::ZERO,
            running_since: None,
            games_played: 0,
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Stop or resume the play clock
    pub fn on_pause_changed(&mut self, paused: bool) {
        self.set_paused_at(paused, Instant::now());
    }

    pub fn on_game_over(&mut self) {
        self.finish_at(Instant::now());
    }

    /// Time spent actually playing the current game
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    pub fn format_time(&self) -> String {
        format_duration(self.elapsed())
    }

    fn start_at(&mut self, now: Instant) {
        self.accumulated = Duration::ZERO;
        self.running_since = Some(now);
    }

    fn set_paused_at(&mut self, paused: bool, now: Instant) {
        if paused {
            self.stop_clock(now);
        } else if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    fn finish_at(&mut self, now: Instant) {
        self.stop_clock(now);
        self.games_played += 1;
    }

    fn stop_clock(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += now.saturating_duration_since(since);
        }
    }

    fn elapsed_at(&self, now: Instant) -> Duration {
        let running = self
            .running_since
            .map(|since| now.saturating_duration_since(since))
            .unwrap_or_default();
        self.accumulated + running
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn format_duration(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        assert_eq!(format_duration(Duration::from_secs(125)), "02:05");
        assert_eq!(format_duration(Duration::ZERO), "00:00");
        assert_eq!(format_duration(Duration::from_secs(3661)), "61:01");
    }

    #[test]
    fn test_clock_stops_while_paused() {
        let t0 = Instant::now();
        let mut metrics = GameMetrics::new();

        metrics.start_at(t0);
        metrics.set_paused_at(true, t0 + Duration::from_secs(10));
        assert_eq!(
            metrics.elapsed_at(t0 + Duration::from_secs(60)),
            Duration::from_secs(10)
        );

        metrics.set_paused_at(false, t0 + Duration::from_secs(60));
        assert_eq!(
            metrics.elapsed_at(t0 + Duration::from_secs(65)),
            Duration::from_secs(15)
        );
    }

    #[test]
    fn test_game_over_freezes_clock_and_counts() {
        let t0 = Instant::now();
        let mut metrics = GameMetrics::new();

        metrics.start_at(t0);
        metrics.finish_at(t0 + Duration::from_secs(30));
        assert_eq!(metrics.games_played, 1);
        assert_eq!(
            metrics.elapsed_at(t0 + Duration::from_secs(90)),
            Duration::from_secs(30)
        );

        metrics.start_at(t0 + Duration::from_secs(90));
        assert_eq!(
            metrics.elapsed_at(t0 + Duration::from_secs(91)),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_idle_clock_reads_zero() {
        let metrics = GameMetrics::new();
        assert_eq!(metrics.elapsed(), Duration::ZERO);
        assert_eq!(metrics.format_time(), "00:00");
    }
}
