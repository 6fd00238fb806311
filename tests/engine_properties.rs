use std::collections::HashSet;

use grid_snake::game::{
    Command, Direction, GameConfig, GameEngine, GameState, POINTS_PER_FOOD, Phase, Position, Snake,
    TickOutcome,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn assert_invariants(engine: &GameEngine, config: &GameConfig) {
    let state = engine.state();
    let grid = engine.grid();

    for cell in state.snake.segments() {
        assert!(grid.in_bounds(cell), "snake cell {cell:?} out of bounds");
    }
    if let Some(food) = state.food {
        assert!(grid.in_bounds(food), "food {food:?} out of bounds");
        assert!(!state.is_occupied_by_snake(food), "food {food:?} under the snake");
    }
    if !state.over {
        let unique: HashSet<_> = state.snake.segments().collect();
        assert_eq!(unique.len(), state.snake.len(), "snake overlaps itself");
    }
    assert_eq!(state.score % POINTS_PER_FOOD, 0);
    assert!(state.speed_ms >= config.min_speed_ms);
    assert!(state.speed_ms <= config.initial_speed_ms);
}

/// Drive the engine with random commands and check every tick against the rules
fn random_playthrough(seed: u64, config: GameConfig, steps: usize) {
    let mut engine = GameEngine::with_seed(config.clone(), seed).unwrap();
    let mut rng = StdRng::seed_from_u64(seed.wrapping_mul(31));
    engine.start();

    for _ in 0..steps {
        match rng.gen_range(0..10) {
            0 => {
                engine.apply(Command::TogglePause);
            }
            1..=4 => {
                let direction = Direction::ALL[rng.gen_range(0..4)];
                let before = engine.state().direction;
                engine.apply(Command::SetDirection(direction));
                if before.is_opposite(direction) {
                    assert_eq!(engine.state().direction, before);
                }
            }
            _ => {}
        }

        let before = engine.state().clone();
        let outcome = engine.tick();
        let after = engine.state();

        match outcome {
            TickOutcome::Skipped => assert_eq!(after, &before),
            TickOutcome::Moved => {
                assert_eq!(after.score, before.score);
                assert_eq!(after.snake.len(), before.snake.len());
            }
            TickOutcome::Ate { .. } => {
                assert_eq!(after.score, before.score + POINTS_PER_FOOD);
                assert_eq!(after.snake.len(), before.snake.len() + 1);
                assert_eq!(Some(after.snake.head()), before.food);
            }
            TickOutcome::GameOver { final_score, .. } => {
                assert_eq!(final_score, before.score);
                assert_eq!(engine.phase(), Phase::Over);
                engine.start();
            }
        }

        assert_invariants(&engine, &config);
    }
}

#[test]
fn random_play_respects_invariants() {
    for seed in 0..20 {
        random_playthrough(seed, GameConfig::default(), 2_000);
    }
}

#[test]
fn random_play_on_tiny_grid_respects_invariants() {
    for seed in 0..20 {
        random_playthrough(seed, GameConfig::new(3), 2_000);
    }
}

#[test]
fn first_tick_moves_right_from_center() {
    let mut engine = GameEngine::with_seed(GameConfig::default(), 99).unwrap();
    engine.start();
    let mut state = engine.state().clone();
    state.food = Some(Position::new(0, 0));
    engine.try_load(state).unwrap();

    assert_eq!(engine.tick(), TickOutcome::Moved);
    assert_eq!(
        engine.state().snake.segments().collect::<Vec<_>>(),
        vec![Position::new(11, 10)]
    );
}

#[test]
fn speed_freezes_at_floor_across_many_milestones() {
    let config = GameConfig::default();
    let mut engine = GameEngine::with_seed(config.clone(), 5).unwrap();
    engine.start();

    let mut speeds = Vec::new();
    for milestone in 1..=60u32 {
        // Keep the snake short and put food straight ahead of a fresh head
        let mut state = GameState::new(
            Snake::new(Position::new(5, 5)),
            Some(Position::new(6, 5)),
            Direction::Right,
            engine.state().speed_ms,
        );
        state.score = milestone * 100 - POINTS_PER_FOOD;
        engine.try_load(state).unwrap();

        assert!(matches!(engine.tick(), TickOutcome::Ate { .. }));
        speeds.push(engine.state().speed_ms);
    }

    // 150 -> 50 in steps of 2 takes 50 milestones, then it stays put
    assert_eq!(speeds[0], 148);
    assert_eq!(speeds[49], 50);
    assert!(speeds[50..].iter().all(|&speed| speed == 50));
}
