//! Grid cells and movement directions

use crate::config::GRID_SIDE;

/// Direction of movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in grid coordinates; y grows downwards
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Check if this direction is opposite to another
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in `direction`. No wrapping: the result may be off-board.
    pub fn step(self, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell::new(self.x + dx, self.y + dy)
    }

    pub fn on_board(self) -> bool {
        (0..GRID_SIDE).contains(&self.x) && (0..GRID_SIDE).contains(&self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step() {
        let c = Cell::new(6, 10);
        assert_eq!(c.step(Direction::Up), Cell::new(6, 9));
        assert_eq!(c.step(Direction::Down), Cell::new(6, 11));
        assert_eq!(c.step(Direction::Left), Cell::new(5, 10));
        assert_eq!(c.step(Direction::Right), Cell::new(7, 10));
    }

    #[test]
    fn test_on_board_edges() {
        assert!(Cell::new(0, 0).on_board());
        assert!(Cell::new(GRID_SIDE - 1, GRID_SIDE - 1).on_board());
        assert!(!Cell::new(-1, 5).on_board());
        assert!(!Cell::new(5, GRID_SIDE).on_board());
    }

    #[test]
    fn test_is_opposite() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Right.is_opposite(Direction::Right));
    }
}
