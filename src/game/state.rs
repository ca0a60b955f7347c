//! The single live game state

use std::collections::VecDeque;
use std::time::Duration;

use rand::Rng;
use tracing::trace;

use super::cell::{Cell, Direction};
use super::items::{self, Item};
use super::rules;

/// Where the snake starts, head first
pub const START_SNAKE: [Cell; 3] = [Cell::new(6, 10), Cell::new(5, 10), Cell::new(4, 10)];

pub const START_DIRECTION: Direction = Direction::Right;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Over,
}

/// Snake, items, score and timers of one game. Replaced wholesale on restart.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Body segments, head at the front
    pub(crate) snake: VecDeque<Cell>,
    pub(crate) items: Vec<Item>,
    pub(crate) direction: Direction,
    pub(crate) pending_direction: Direction,
    pub(crate) score: u32,
    pub(crate) level: u32,
    /// Deadline of the golden effect; `Some` while it is active
    pub(crate) golden_until: Option<Duration>,
    pub(crate) phase: Phase,
}

impl GameState {
    /// Fresh game: starting snake and a full set of items
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut state = Self::with_layout(START_SNAKE.to_vec(), START_DIRECTION, Vec::new());
        items::reset_and_respawn(&mut state.items, &state.snake, state.level, rng);
        state
    }

    /// Game with an explicit board, at level 1 with no score
    pub fn with_layout(snake: Vec<Cell>, direction: Direction, items: Vec<Item>) -> Self {
        Self {
            snake: snake.into(),
            items,
            direction,
            pending_direction: direction,
            score: 0,
            level: 1,
            golden_until: None,
            phase: Phase::Running,
        }
    }

    /// Latch a direction for the next tick. A reversal of the current
    /// direction of travel is dropped and `false` returned.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            trace!("Ignoring reversal {:?} -> {:?}", self.direction, direction);
            return false;
        }
        self.pending_direction = direction;
        true
    }

    pub fn snake(&self) -> &VecDeque<Cell> {
        &self.snake
    }

    pub fn head(&self) -> Option<Cell> {
        self.snake.front().copied()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn golden_active(&self) -> bool {
        self.golden_until.is_some()
    }

    pub fn golden_deadline(&self) -> Option<Duration> {
        self.golden_until
    }

    /// Interval the tick timer should currently run at
    pub fn tick_interval(&self) -> Duration {
        rules::tick_interval(self.level, self.golden_active())
    }
}
