use super::state::Position;

/// Square playing field of `dimension` x `dimension` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    dimension: usize,
}

impl Grid {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    /// Cells per side
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Check if a position is within the grid bounds
    pub fn in_bounds(&self, pos: Position) -> bool {
        let size = self.dimension as i64;
        let (x, y) = (i64::from(pos.x), i64::from(pos.y));
        x >= 0 && x < size && y >= 0 && y < size
    }

    /// Cell the snake spawns on
    pub fn center(&self) -> Position {
        let mid = (self.dimension / 2) as i32;
        Position::new(mid, mid)
    }

    /// Every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Position> + use<> {
        let size = self.dimension as i32;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }
}
