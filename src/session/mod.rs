//! Game session controller
//!
//! A [`GameSession`] owns one engine, the tick scheduler driving it and the
//! high score store. Commands and ticks both go through `&mut self`, so a
//! command can never land halfway through a tick.

use anyhow::Result;
use rand::Rng;
use rand::rngs::StdRng;

use crate::game::{Command, EndReason, GameConfig, GameEngine, Phase, Snapshot, TickOutcome};
use crate::scheduler::{Tick, TickScheduler};
use crate::storage::HighScoreStore;

/// Emitted once each time a game ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverSummary {
    pub final_score: u32,
    /// Best score after this game has been taken into account
    pub high_score: u32,
    pub new_record: bool,
    pub reason: EndReason,
}

/// What handling a tick amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Stale tick, or the game was idle, paused or over
    Ignored,
    /// The board changed and should be redrawn
    Updated,
    GameOver(GameOverSummary),
}

pub struct GameSession<R = StdRng> {
    engine: GameEngine<R>,
    scheduler: TickScheduler,
    store: Box<dyn HighScoreStore>,
    high_score: u32,
    last_summary: Option<GameOverSummary>,
}

impl GameSession<StdRng> {
    pub fn new(
        config: GameConfig,
        seed: Option<u64>,
        store: impl HighScoreStore + 'static,
    ) -> Result<Self> {
        let engine = match seed {
            Some(seed) => GameEngine::with_seed(config, seed)?,
            None => GameEngine::new(config)?,
        };
        Ok(Self::with_engine(engine, store))
    }
}

impl<R: Rng> GameSession<R> {
    /// Wrap an engine. The store is read here and only written on game over.
    pub fn with_engine(engine: GameEngine<R>, store: impl HighScoreStore + 'static) -> Self {
        let high_score = store.get().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Could not read high score, starting from 0");
            0
        });
        tracing::info!(high_score, "Session ready");

        Self {
            engine,
            scheduler: TickScheduler::new(),
            store: Box::new(store),
            high_score,
            last_summary: None,
        }
    }

    pub fn engine(&self) -> &GameEngine<R> {
        &self.engine
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Summary of the most recent finished game, cleared on start
    pub fn last_summary(&self) -> Option<GameOverSummary> {
        self.last_summary
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.engine, self.high_score)
    }

    /// Apply an input command. Returns whether visible state changed.
    pub fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Start => {
                let period = self.engine.start();
                self.scheduler.arm(period);
                self.last_summary = None;
                tracing::info!(
                    grid_size = self.engine.config().grid_size,
                    speed_ms = self.engine.state().speed_ms,
                    "Game started"
                );
                true
            }
            Command::TogglePause => {
                let changed = self.engine.toggle_pause();
                if changed {
                    tracing::debug!(paused = self.engine.state().paused, "Pause toggled");
                }
                changed
            }
            Command::SetDirection(direction) => self.engine.set_direction(direction),
        }
    }

    /// Wait for the scheduler's next tick
    pub async fn next_tick(&mut self) -> Tick {
        self.scheduler.tick().await
    }

    /// Run the engine for a tick produced by [`next_tick`](Self::next_tick)
    pub fn on_tick(&mut self, tick: Tick) -> SessionEvent {
        if !self.scheduler.is_current(tick) {
            tracing::debug!(
                tick_generation = tick.generation(),
                current_generation = self.scheduler.generation(),
                "Discarding stale tick"
            );
            return SessionEvent::Ignored;
        }

        match self.engine.tick() {
            TickOutcome::Skipped => SessionEvent::Ignored,
            TickOutcome::Moved => SessionEvent::Updated,
            TickOutcome::Ate { speed_changed } => {
                if speed_changed {
                    let period = self.engine.tick_interval();
                    self.scheduler.arm(period);
                    tracing::info!(
                        score = self.engine.state().score,
                        speed_ms = self.engine.state().speed_ms,
                        "Speed increased"
                    );
                }
                SessionEvent::Updated
            }
            TickOutcome::GameOver {
                reason,
                final_score,
            } => {
                self.scheduler.cancel();
                SessionEvent::GameOver(self.finish(reason, final_score))
            }
        }
    }

    fn finish(&mut self, reason: EndReason, final_score: u32) -> GameOverSummary {
        let new_record = final_score > self.high_score;
        if new_record {
            self.high_score = final_score;
            if let Err(err) = self.store.set(final_score) {
                tracing::warn!(error = %err, score = final_score, "Could not save high score");
            }
        }

        let summary = GameOverSummary {
            final_score,
            high_score: self.high_score,
            new_record,
            reason,
        };
        tracing::info!(
            final_score,
            high_score = self.high_score,
            new_record,
            ?reason,
            "Game over"
        );
        self.last_summary = Some(summary);
        summary
    }
}
