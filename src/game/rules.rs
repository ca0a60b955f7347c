//! Level-dependent formulas for speed, scoring and spawn odds

use std::time::Duration;

use crate::config::{
    BASE_BOMB_CHANCE, BASE_FOOD_SCORE, BASE_GAME_SPEED, BOMB_CHANCE_STEP, LEVEL_UP_SCORE,
    MAX_BOMB_CHANCE, MIN_GAME_SPEED, SLOW_SPEED, SPEED_STEP,
};

/// Tick interval for `level` without the golden effect
pub fn base_speed(level: u32) -> Duration {
    let reduction = SPEED_STEP.saturating_mul(level.saturating_sub(1));
    BASE_GAME_SPEED.saturating_sub(reduction).max(MIN_GAME_SPEED)
}

/// Interval actually used by the tick timer
pub fn tick_interval(level: u32, golden_active: bool) -> Duration {
    if golden_active {
        SLOW_SPEED
    } else {
        base_speed(level)
    }
}

/// Points for a normal apple at `level`; golden apples multiply this
pub fn food_score(level: u32) -> u32 {
    BASE_FOOD_SCORE
        .saturating_sub(level.saturating_sub(1))
        .max(1)
}

/// Rendered apple size as a fraction of a cell. Collision stays one cell.
pub fn food_size(level: u32) -> f32 {
    (1.0 - level.saturating_sub(1) as f32 * 0.1).max(0.5)
}

pub fn bomb_chance(level: u32) -> f64 {
    (BASE_BOMB_CHANCE + BOMB_CHANCE_STEP * level.saturating_sub(1) as f64).min(MAX_BOMB_CHANCE)
}

/// Score at which `level` is left behind
pub fn level_threshold(level: u32) -> u32 {
    level.saturating_mul(LEVEL_UP_SCORE)
}
