//! Tick processing: movement, collisions, pickups and levelling

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use super::cell::Cell;
use super::items::{self, ItemKind};
use super::rules;
use super::state::{GameState, Phase};
use crate::config::{GOLDEN_DURATION, GOLDEN_MULTIPLIER};

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Wall,
    SelfCollision,
    Bomb,
}

/// What a single tick did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Item eaten this tick, if any
    pub ate: Option<ItemKind>,
    /// Set when this tick ended the game
    pub died: Option<DeathCause>,
    /// Set when a golden apple (re)armed the effect
    pub golden_deadline: Option<Duration>,
    /// Levels gained this tick
    pub levels_gained: u32,
    /// New timer interval when it differs from the one before the tick
    pub new_interval: Option<Duration>,
}

impl GameState {
    /// Advance the game by one cell. `now` is the time the tick fires at,
    /// used to place the golden effect deadline.
    pub fn tick<R: Rng>(&mut self, now: Duration, rng: &mut R) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.phase == Phase::Over {
            return outcome;
        }
        let Some(head) = self.head() else {
            return outcome;
        };
        let interval_before = self.tick_interval();

        self.direction = self.pending_direction;
        let new_head = head.step(self.direction);

        // Checked against the body before the tail moves: entering the
        // current tail cell is fatal.
        if !new_head.on_board() {
            return self.finish(outcome, DeathCause::Wall);
        }
        if self.snake.contains(&new_head) {
            return self.finish(outcome, DeathCause::SelfCollision);
        }

        self.snake.push_front(new_head);

        match self.take_item_at(new_head) {
            Some(kind) => {
                outcome.ate = Some(kind);
                let base = rules::food_score(self.level);
                match kind {
                    ItemKind::Normal => self.score += base,
                    ItemKind::Golden => {
                        self.score += base * GOLDEN_MULTIPLIER;
                        let deadline = now + GOLDEN_DURATION;
                        self.golden_until = Some(deadline);
                        outcome.golden_deadline = Some(deadline);
                    }
                    ItemKind::Bomb => return self.finish(outcome, DeathCause::Bomb),
                }
                debug!("Ate {:?}, score {}", kind, self.score);

                if !items::has_apples(&self.items) {
                    items::reset_and_respawn(&mut self.items, &self.snake, self.level, rng);
                }
            }
            None => {
                self.snake.pop_back();
            }
        }

        while self.score >= rules::level_threshold(self.level) {
            self.level += 1;
            outcome.levels_gained += 1;
            info!("Level up: {} (score {})", self.level, self.score);
        }

        let interval_after = self.tick_interval();
        if interval_after != interval_before {
            outcome.new_interval = Some(interval_after);
        }
        outcome
    }

    /// End the golden effect. Returns the restored interval, or `None` when
    /// no effect was active.
    pub fn expire_golden(&mut self) -> Option<Duration> {
        self.golden_until.take()?;
        debug!("Golden effect expired");
        Some(self.tick_interval())
    }

    fn take_item_at(&mut self, cell: Cell) -> Option<ItemKind> {
        let index = self.items.iter().position(|item| item.cell == cell)?;
        Some(self.items.remove(index).kind)
    }

    fn finish(&mut self, mut outcome: TickOutcome, cause: DeathCause) -> TickOutcome {
        self.phase = Phase::Over;
        outcome.died = Some(cause);
        info!(
            "Game over ({:?}): score {} at level {}",
            cause, self.score, self.level
        );
        outcome
    }
}
