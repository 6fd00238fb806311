//! Food placement
//!
//! Food is dropped on a uniformly random free cell. Sampling is retried a
//! bounded number of times; a crowded board then falls back to picking among
//! the remaining free cells directly, and a full board yields no food at all.

use rand::Rng;
use rand::seq::IteratorRandom;

use super::grid::Grid;
use super::state::{Position, Snake};

/// Rejection-sampling attempts before switching to the free-cell scan
const MAX_SAMPLE_ATTEMPTS: usize = 256;

/// Anything that can tell whether a cell is taken
pub trait Occupancy {
    fn is_occupied(&self, pos: Position) -> bool;
}

impl Occupancy for Snake {
    fn is_occupied(&self, pos: Position) -> bool {
        self.occupies(pos)
    }
}

impl Occupancy for [Position] {
    fn is_occupied(&self, pos: Position) -> bool {
        self.contains(&pos)
    }
}

/// Pick a random in-bounds cell not covered by `occupied`
///
/// Returns `None` only when every cell of the grid is occupied.
pub fn place_food<O, R>(occupied: &O, grid: Grid, rng: &mut R) -> Option<Position>
where
    O: Occupancy + ?Sized,
    R: Rng,
{
    let size = grid.dimension() as i32;
    if size == 0 {
        return None;
    }

    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let pos = Position::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if !occupied.is_occupied(pos) {
            return Some(pos);
        }
    }

    tracing::debug!(
        attempts = MAX_SAMPLE_ATTEMPTS,
        "Random food sampling exhausted, scanning free cells"
    );
    grid.cells()
        .filter(|&pos| !occupied.is_occupied(pos))
        .choose(rng)
}
