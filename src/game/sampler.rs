//! Spawn position sampling
//!
//! Positions are biased towards the walls: most spawns land in the two-cell
//! band along one of the four edges. A sampled cell that is already occupied
//! is redrawn uniformly over the whole board.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::trace;

use super::cell::Cell;
use crate::config::{GRID_SIDE, MAX_SAMPLE_ATTEMPTS, WALL_BAND, WALL_BIAS};

/// Total number of cells on the board
pub const BOARD_CAPACITY: usize = (GRID_SIDE * GRID_SIDE) as usize;

/// Pick a free on-board cell, or `None` when `occupied` covers the whole board.
pub fn sample<R: Rng>(occupied: &HashSet<Cell>, rng: &mut R) -> Option<Cell> {
    let taken = occupied.iter().filter(|c| c.on_board()).count();
    if taken >= BOARD_CAPACITY {
        return None;
    }

    let mut cell = if rng.gen_bool(WALL_BIAS) {
        near_wall(rng)
    } else {
        anywhere(rng)
    };

    let mut attempts = 0;
    while occupied.contains(&cell) {
        attempts += 1;
        if attempts > MAX_SAMPLE_ATTEMPTS {
            trace!("Resampling gave up after {} attempts, scanning free cells", attempts);
            return free_cells(occupied).choose(rng).copied();
        }
        cell = anywhere(rng);
    }

    Some(cell)
}

fn anywhere<R: Rng>(rng: &mut R) -> Cell {
    Cell::new(rng.gen_range(0..GRID_SIDE), rng.gen_range(0..GRID_SIDE))
}

fn near_wall<R: Rng>(rng: &mut R) -> Cell {
    let along = rng.gen_range(0..GRID_SIDE);
    let depth = rng.gen_range(0..WALL_BAND);
    let far = GRID_SIDE - 1 - depth;
    match rng.gen_range(0..4) {
        0 => Cell::new(along, depth), // top
        1 => Cell::new(far, along),   // right
        2 => Cell::new(along, far),   // bottom
        _ => Cell::new(depth, along), // left
    }
}

fn free_cells(occupied: &HashSet<Cell>) -> Vec<Cell> {
    (0..GRID_SIDE)
        .flat_map(|y| (0..GRID_SIDE).map(move |x| Cell::new(x, y)))
        .filter(|c| !occupied.contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn in_wall_band(c: Cell) -> bool {
        c.x < WALL_BAND || c.y < WALL_BAND || c.x >= GRID_SIDE - WALL_BAND || c.y >= GRID_SIDE - WALL_BAND
    }

    #[test]
    fn test_sample_is_on_board_and_free() {
        let mut rng = StdRng::seed_from_u64(7);
        let occupied: HashSet<Cell> = (0..GRID_SIDE).map(|x| Cell::new(x, 0)).collect();
        for _ in 0..500 {
            let c = sample(&occupied, &mut rng).unwrap();
            assert!(c.on_board());
            assert!(!occupied.contains(&c));
        }
    }

    #[test]
    fn test_sample_prefers_walls() {
        let mut rng = StdRng::seed_from_u64(42);
        let empty = HashSet::new();
        let draws = 4000;
        let near = (0..draws)
            .filter(|_| in_wall_band(sample(&empty, &mut rng).unwrap()))
            .count();
        // 0.7 + 0.3 * (144/400) ~= 0.81 of draws land in the band
        let share = near as f64 / draws as f64;
        assert!(share > 0.75 && share < 0.87, "wall share was {share}");
    }

    #[test]
    fn test_sample_full_board_returns_none() {
        let mut rng = StdRng::seed_from_u64(1);
        let all: HashSet<Cell> = free_cells(&HashSet::new()).into_iter().collect();
        assert_eq!(all.len(), BOARD_CAPACITY);
        assert_eq!(sample(&all, &mut rng), None);
    }

    #[test]
    fn test_sample_finds_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let hole = Cell::new(13, 4);
        let occupied: HashSet<Cell> = free_cells(&HashSet::new())
            .into_iter()
            .filter(|c| *c != hole)
            .collect();
        assert_eq!(sample(&occupied, &mut rng), Some(hole));
    }
}
